//! Partial-order ("Hasse") diagrams of gate sequences.
//!
//! Given a gate sequence, the ordering constraints between its gates form a
//! partial order: gate `i` must precede gate `k > i` whenever the two don't
//! commute. The diagram keeps only the covering relations of that order,
//! i.e. the transitive reduction of the non-commutation relation, so that
//! two sequences related by swaps of adjacent commuting gates produce
//! isomorphic diagrams.
//!
//! Nodes are indexed by position in the sequence, so every edge `i -> k`
//! satisfies `i < k`, and node indices are always a valid topological order.

use std::{
    collections::VecDeque,
    fs,
    io::Write,
    path::Path,
};
use itertools::Itertools;
use ndarray as nd;
use crate::{
    commute::Commute,
    error::Result,
    gate::{ Circuit, Gate, Labeling },
};

/// A labeled directed acyclic graph over the positions of a gate sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HasseDiagram {
    n: usize,
    adj: nd::Array2<bool>,
    labels: Vec<String>,
}

impl HasseDiagram {
    /// Create a new diagram with the given node labels and no edges.
    pub fn new(labels: Vec<String>) -> Self {
        let n = labels.len();
        Self { n, adj: nd::Array2::from_elem((n, n), false), labels }
    }

    /// Build the diagram of a circuit under a given commutation rule.
    ///
    /// Fails if `rule` can't decide commutation for some pair of gates.
    pub fn build<C>(circuit: &Circuit, rule: &C, labeling: Labeling)
        -> Result<Self>
    where C: Commute + ?Sized
    {
        Self::from_gates(circuit.gates(), rule, labeling)
    }

    /// Like [`build`][Self::build], but for a bare slice of gates.
    pub fn from_gates<C>(gates: &[Gate], rule: &C, labeling: Labeling)
        -> Result<Self>
    where C: Commute + ?Sized
    {
        // single gates never reach the pairwise check
        gates.iter().try_for_each(|g| rule.check(g))?;
        let labels: Vec<String>
            = gates.iter().map(|g| g.label(labeling)).collect();
        let mut diagram = Self::new(labels);
        // full non-commutation relation first
        let pairs = gates.iter().enumerate().tuple_combinations();
        for ((i, a), (k, b)) in pairs {
            if !rule.commutes(a, b)? { diagram.adj[[i, k]] = true; }
        }
        diagram.reduce();
        Ok(diagram)
    }

    /// Number of nodes.
    pub fn n(&self) -> usize { self.n }

    pub fn labels(&self) -> &[String] { &self.labels }

    /// Return the label of `node`, if it exists.
    pub fn label(&self, node: usize) -> Option<&str> {
        self.labels.get(node).map(String::as_str)
    }

    /// Return `true` if there is a direct edge `a -> b`.
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        a < self.n && b < self.n && self.adj[[a, b]]
    }

    /// Add an edge `a -> b`.
    ///
    /// Does nothing unless `a < b < n`.
    pub fn add_edge(&mut self, a: usize, b: usize) -> &mut Self {
        if a >= b || b >= self.n { return self; }
        self.adj[[a, b]] = true;
        self
    }

    /// Remove the edge `a -> b`.
    ///
    /// Does nothing if there is no such edge.
    pub fn remove_edge(&mut self, a: usize, b: usize) -> &mut Self {
        if a >= self.n || b >= self.n { return self; }
        self.adj[[a, b]] = false;
        self
    }

    /// Return an iterator over all edges `(a, b)` in row-major order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adj.indexed_iter()
            .filter_map(|(ab, e)| e.then_some(ab))
    }

    pub fn edge_count(&self) -> usize {
        self.adj.iter().filter(|e| **e).count()
    }

    /// Return an iterator over the direct successors of `node`.
    pub fn successors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        let row = (node < self.n).then(|| self.adj.row(node));
        row.into_iter()
            .flat_map(|r| r.into_iter().enumerate())
            .filter_map(|(k, e)| e.then_some(k))
    }

    /// Return an iterator over the direct predecessors of `node`.
    pub fn predecessors(&self, node: usize)
        -> impl Iterator<Item = usize> + '_
    {
        let col = (node < self.n).then(|| self.adj.column(node));
        col.into_iter()
            .flat_map(|c| c.into_iter().enumerate())
            .filter_map(|(k, e)| e.then_some(k))
    }

    /// Return `true` if there is a directed path of length at least one from
    /// `a` to `b`.
    pub fn reachable(&self, a: usize, b: usize) -> bool {
        if a >= self.n || b >= self.n { return false; }
        let mut seen: Vec<bool> = vec![false; self.n];
        let mut queue: VecDeque<usize> = self.successors(a).collect();
        while let Some(node) = queue.pop_front() {
            if node == b { return true; }
            if seen[node] { continue; }
            seen[node] = true;
            queue.extend(self.successors(node));
        }
        false
    }

    /// Compute the transitive closure of the edge relation.
    ///
    /// Entry `(a, b)` is `true` iff `b` is reachable from `a`.
    pub fn closure(&self) -> nd::Array2<bool> {
        let mut reach: nd::Array2<bool>
            = nd::Array2::from_elem((self.n, self.n), false);
        // edges only run forward, so each row depends only on later rows
        for a in (0..self.n).rev() {
            for b in a + 1..self.n {
                if !self.adj[[a, b]] { continue; }
                reach[[a, b]] = true;
                for c in b + 1..self.n {
                    if reach[[b, c]] { reach[[a, c]] = true; }
                }
            }
        }
        reach
    }

    /// Replace the edge set by its transitive reduction.
    ///
    /// An edge `a -> b` is dropped iff `b` stays reachable from `a` through
    /// some other direct successor of `a`.
    pub fn reduce(&mut self) -> &mut Self {
        let reach = self.closure();
        let redundant: Vec<(usize, usize)>
            = self.edges()
            .filter(|&(a, b)| {
                self.successors(a).any(|c| c != b && reach[[c, b]])
            })
            .collect();
        redundant.into_iter()
            .for_each(|(a, b)| { self.adj[[a, b]] = false; });
        self
    }

    /// Return `true` if no edge is implied by a longer path.
    pub fn is_reduced(&self) -> bool {
        let reach = self.closure();
        self.edges()
            .all(|(a, b)| !self.successors(a).any(|c| c != b && reach[[c, b]]))
    }

    /// Return an object containing an encoding of `self` in the [dot
    /// language][dot-lang].
    ///
    /// Rendering this object using the default formatter will result in a full
    /// dot string representation of the diagram.
    ///
    /// [dot-lang]: https://en.wikipedia.org/wiki/DOT_(graph_description_language)
    pub fn to_graphviz(&self, name: &str) -> Result<tabbycat::Graph> {
        use tabbycat::*;
        use tabbycat::attributes::*;

        const FONT: &str = "DejaVu Sans";
        const FONTSIZE: f64 = 10.0; // pt
        const NODE_MARGIN: f64 = 0.025; // in
        const NODE_COLOR: Color = Color::Rgb(115, 150, 250);

        let mut statements
            = StmtList::new()
            .add_attr(
                AttrType::Graph,
                AttrList::new().add_pair(rankdir(RankDir::LR)),
            )
            .add_attr(
                AttrType::Node,
                AttrList::new()
                    .add_pair(fontname(FONT))
                    .add_pair(fontsize(FONTSIZE))
                    .add_pair(margin(NODE_MARGIN))
                    ,
            );
        for (k, lab) in self.labels.iter().enumerate() {
            let attrs
                = AttrList::new()
                .add_pair(label(format!("{}: {}", k, lab)))
                .add_pair(shape(Shape::Circle))
                .add_pair(style(Style::Filled))
                .add_pair(fillcolor(NODE_COLOR));
            statements = statements.add_node(k.into(), None, Some(attrs));
        }
        for (a, b) in self.edges() {
            statements
                = statements.add_edge(
                    Edge::head_node(a.into(), None)
                        .arrow_to_node(b.into(), None)
                );
        }
        GraphBuilder::default()
            .graph_type(GraphType::DiGraph)
            .strict(false)
            .id(Identity::quoted(name))
            .stmts(statements)
            .build()
            .map_err(|err| crate::error::Error::Graphviz(err.to_string()))
    }

    /// Like [`to_graphviz`][Self::to_graphviz], but render directly to a string
    /// and write it to `path`.
    pub fn save_graphviz<P>(&self, name: &str, path: P) -> Result<&Self>
    where P: AsRef<Path>
    {
        let graphviz = self.to_graphviz(name)?;
        fs::OpenOptions::new()
            .write(true)
            .append(false)
            .create(true)
            .truncate(true)
            .open(path)?
            .write_all(format!("{}", graphviz).as_bytes())?;
        Ok(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        commute::{ CliffordTable, MatrixRule },
        error::Error,
        gate::GateKind,
    };

    fn diagram(n: usize, gates: &[Gate]) -> HasseDiagram {
        let circuit = Circuit::from_gates(n, gates.iter().copied()).unwrap();
        HasseDiagram::build(&circuit, &CliffordTable, Labeling::Shape).unwrap()
    }

    fn assert_minimal(diagram: &HasseDiagram) {
        assert!(diagram.is_reduced());
        for (a, b) in diagram.edges().collect::<Vec<_>>() {
            let mut cut = diagram.clone();
            cut.remove_edge(a, b);
            assert!(!cut.reachable(a, b), "edge {} -> {} is redundant", a, b);
        }
    }

    #[test]
    fn diamond() {
        // T and S commute, as do the two H's
        let d = diagram(2, &[Gate::H(0), Gate::T(0), Gate::S(0), Gate::H(0)]);
        let edges: Vec<(usize, usize)> = d.edges().collect();
        assert_eq!(edges, vec![(0, 1), (0, 2), (1, 3), (2, 3)]);
        assert_minimal(&d);
        assert!(d.reachable(0, 3));
        assert!(!d.reachable(1, 2));
    }

    #[test]
    fn implied_edge_dropped() {
        let d = diagram(2, &[Gate::H(0), Gate::T(0), Gate::CX(1, 0)]);
        let edges: Vec<(usize, usize)> = d.edges().collect();
        assert_eq!(edges, vec![(0, 1), (1, 2)]);
        assert!(d.reachable(0, 2));
        assert_minimal(&d);
    }

    #[test]
    fn commuting_gates_unconnected() {
        let d = diagram(3, &[Gate::T(0), Gate::CX(0, 1), Gate::S(0), Gate::H(2)]);
        assert_eq!(d.edge_count(), 0);
        assert_eq!(d.labels(), &["T", "CX(c,t)", "S", "H"]);
    }

    #[test]
    fn cnot_cycle() {
        let d = diagram(3, &[Gate::CX(0, 1), Gate::CX(1, 2), Gate::CX(2, 0)]);
        let edges: Vec<(usize, usize)> = d.edges().collect();
        // 0 -> 2 is implied by 0 -> 1 -> 2
        assert_eq!(edges, vec![(0, 1), (1, 2)]);
        assert_eq!(d.successors(1).collect::<Vec<_>>(), vec![2]);
        assert_eq!(d.predecessors(1).collect::<Vec<_>>(), vec![0]);
        assert_minimal(&d);

        // shared targets and shared controls both commute
        let d = diagram(4, &[Gate::CX(0, 1), Gate::CX(2, 1), Gate::CX(0, 3)]);
        assert_eq!(d.edge_count(), 0);
    }

    #[test]
    fn random_circuits_minimal() {
        use rand::{ rngs::StdRng, SeedableRng };
        use crate::{ generate::random_circuit, gate::GateSet };
        let mut rng = StdRng::seed_from_u64(10546);
        let gate_set = GateSet::clifford_t();
        for _ in 0..200 {
            let circuit = random_circuit(&gate_set, 3, 12, &mut rng).unwrap();
            let d = HasseDiagram::build(&circuit, &MatrixRule, Labeling::Shape)
                .unwrap();
            assert_minimal(&d);
            // every non-commuting pair is still ordered
            let gates = circuit.gates();
            for ((i, a), (k, b)) in gates.iter().enumerate().tuple_combinations() {
                if !CliffordTable.commutes(a, b).unwrap() {
                    assert!(d.reachable(i, k));
                }
            }
        }
    }

    #[test]
    fn unsupported_propagates() {
        let circuit
            = Circuit::from_gates(2, [Gate::H(0), Gate::Swap(0, 1)]).unwrap();
        assert!(
            HasseDiagram::build(&circuit, &CliffordTable, Labeling::Shape)
                .is_err()
        );
        // a lone unsupported gate has no partner to compare against
        let lone = Circuit::from_gates(2, [Gate::Swap(0, 1)]).unwrap();
        for labeling in [Labeling::Shape, Labeling::Indexed] {
            assert!(matches!(
                HasseDiagram::build(&lone, &CliffordTable, labeling),
                Err(Error::UnsupportedGate { kind: GateKind::Swap }),
            ));
            assert!(matches!(
                HasseDiagram::build(&lone, &MatrixRule, labeling),
                Err(Error::UnsupportedGate { kind: GateKind::Swap }),
            ));
        }
    }

    #[test]
    fn edit_edges() {
        let mut d = HasseDiagram::new(vec!["a".into(), "b".into(), "c".into()]);
        d.add_edge(0, 1).add_edge(1, 2).add_edge(0, 2).add_edge(2, 0);
        assert_eq!(d.edge_count(), 3);
        assert!(!d.is_reduced());
        d.reduce();
        assert_eq!(d.edges().collect::<Vec<_>>(), vec![(0, 1), (1, 2)]);
        assert_eq!(d.label(2), Some("c"));
        assert_eq!(d.label(3), None);
    }

    #[test]
    fn graphviz_mentions_edges() {
        let d = diagram(2, &[Gate::H(0), Gate::CX(0, 1)]);
        let dot = format!("{}", d.to_graphviz("test").unwrap());
        assert!(dot.contains("digraph"));
        assert!(dot.contains("->"));
    }
}
