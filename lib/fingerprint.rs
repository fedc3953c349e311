//! Isomorphism-invariant fingerprints of labeled [`HasseDiagram`]s.
//!
//! Fingerprints are computed by Weisfeiler–Lehman color refinement: every node
//! starts with a color derived from its label, and at each round is recolored
//! by hashing its current color together with the sorted colors of its
//! predecessors and, separately, of its successors. Refinement stops once a
//! round fails to split any color class (or after a fixed number of rounds,
//! if one is requested). The fingerprint is a SHA-256 digest of the sorted
//! multiset of all colors seen over all rounds.
//!
//! Isomorphic diagrams always receive equal fingerprints. The converse holds
//! with overwhelming probability for the small diagrams produced by short gate
//! sequences, but WL refinement is not a complete isomorphism test: some
//! highly regular non-isomorphic graphs can't be told apart.

use std::fmt;
use itertools::Itertools;
use sha2::{ Digest, Sha256 };
use crate::hasse::HasseDiagram;

type Color = u128;

/// Opaque fingerprint of a labeled diagram, as a lowercase hex string.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fingerprint(String);

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str { &self.0 }
}

impl Fingerprint {
    pub fn as_str(&self) -> &str { &self.0 }
}

/// Weisfeiler–Lehman hasher.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WlHasher {
    /// Run exactly this many refinement rounds instead of stopping once the
    /// coloring is stable.
    pub rounds: Option<usize>,
}

impl WlHasher {
    /// Refine until stable, for at most as many rounds as there are nodes.
    pub fn new() -> Self { Self { rounds: None } }

    /// Always run exactly `rounds` refinement rounds.
    pub fn with_rounds(rounds: usize) -> Self { Self { rounds: Some(rounds) } }

    pub fn hash(&self, diagram: &HasseDiagram) -> Fingerprint {
        let n = diagram.n();
        let preds: Vec<Vec<usize>>
            = (0..n).map(|k| diagram.predecessors(k).collect()).collect();
        let succs: Vec<Vec<usize>>
            = (0..n).map(|k| diagram.successors(k).collect()).collect();

        let mut colors: Vec<Color>
            = diagram.labels().iter().map(|l| label_color(l)).collect();
        let mut history: Vec<Color> = colors.clone();
        let mut classes: usize = colors.iter().unique().count();
        let max_rounds = self.rounds.unwrap_or(n.max(1));
        for _ in 0..max_rounds {
            colors
                = (0..n)
                .map(|k| {
                    let p: Vec<Color>
                        = preds[k].iter().map(|j| colors[*j]).sorted_unstable()
                        .collect();
                    let s: Vec<Color>
                        = succs[k].iter().map(|j| colors[*j]).sorted_unstable()
                        .collect();
                    node_color(colors[k], &p, &s)
                })
                .collect();
            history.extend(colors.iter().copied());
            let refined = colors.iter().unique().count();
            if self.rounds.is_none() && refined == classes { break; }
            classes = refined;
        }
        history.sort_unstable();

        let mut hasher = Sha256::new();
        hasher.update(b"wl:graph:v1");
        hasher.update((n as u64).to_le_bytes());
        hasher.update((history.len() as u64).to_le_bytes());
        history.iter().for_each(|c| { hasher.update(c.to_le_bytes()); });
        let digest = hasher.finalize();
        Fingerprint(digest.iter().map(|b| format!("{:02x}", b)).collect())
    }
}

/// Fingerprint a diagram with the default [`WlHasher`].
pub fn fingerprint(diagram: &HasseDiagram) -> Fingerprint {
    WlHasher::new().hash(diagram)
}

fn truncate(digest: &[u8]) -> Color {
    let mut buf = [0_u8; 16];
    buf.copy_from_slice(&digest[..16]);
    Color::from_le_bytes(buf)
}

fn label_color(label: &str) -> Color {
    let mut hasher = Sha256::new();
    hasher.update(b"wl:label:v1");
    hasher.update((label.len() as u64).to_le_bytes());
    hasher.update(label.as_bytes());
    truncate(&hasher.finalize())
}

fn node_color(prev: Color, preds: &[Color], succs: &[Color]) -> Color {
    let mut hasher = Sha256::new();
    hasher.update(b"wl:node:v1");
    hasher.update(prev.to_le_bytes());
    for side in [preds, succs] {
        hasher.update((side.len() as u64).to_le_bytes());
        side.iter().for_each(|c| { hasher.update(c.to_le_bytes()); });
    }
    truncate(&hasher.finalize())
}
