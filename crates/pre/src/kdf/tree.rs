//! Binary tree of epoch keys.

use super::{kdf, Key, KEY_BYTES};
use crate::{Error, Result};
use pre_util::ceil_log2;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;
use zeroize::Zeroizing;

/// A binary tree of keys over `epochs` epochs.
///
/// Nodes are labelled by bit strings, the root by the empty string. The two
/// children of the node `label` are kdf(key(label), d), with d the last bit of
/// `label` (0 for the root). The leaves, at depth ⌈log₂ epochs⌉, are the epoch
/// keys, and the leaf of epoch e is labelled by the binary expansion of e.
#[derive(Debug, Clone)]
pub struct KdfTree {
    epochs: u64,
    depth: usize,
    nodes: BTreeMap<String, Key>,
    leaves: BTreeMap<String, Key>,
}

fn children(label: &str, key: &[u8]) -> Result<(Key, Key)> {
    let direction = if label.ends_with('1') { 1 } else { 0 };
    kdf(key, direction)
}

fn check_label(label: &str, depth: usize) -> Result<()> {
    if label.len() > depth || !label.chars().all(|c| c == '0' || c == '1') {
        return Err(Error::DefaultError(format!(
            "Invalid node label {label:?} for a tree of depth {depth}"
        )));
    }
    Ok(())
}

impl KdfTree {
    /// Generate the tree of keys for `epochs` epochs from the root key.
    ///
    /// Returns an error unless there are at least two epochs.
    pub fn generate(root: &[u8; KEY_BYTES], epochs: u64) -> Result<Self> {
        if epochs < 2 {
            return Err(Error::DefaultError(format!(
                "A key tree needs at least 2 epochs, got {epochs}"
            )));
        }
        let depth = ceil_log2(epochs);
        let mut nodes = BTreeMap::new();
        nodes.insert(String::new(), Zeroizing::new(*root));
        let leaves = Self::expand("", root, depth)?;

        let mut frontier = vec![String::new()];
        for _ in 1..depth {
            let mut next = Vec::with_capacity(2 * frontier.len());
            for label in frontier {
                let key = nodes.get(&label).ok_or_else(|| missing(&label))?;
                let (k0, k1) = children(&label, &key[..])?;
                for (bit, child) in [('0', k0), ('1', k1)] {
                    let mut child_label = label.clone();
                    child_label.push(bit);
                    nodes.insert(child_label.clone(), child);
                    next.push(child_label);
                }
            }
            frontier = next;
        }

        debug!(epochs, depth, "generated key tree");
        Ok(Self {
            epochs,
            depth,
            nodes,
            leaves,
        })
    }

    /// Number of epochs covered by the tree.
    pub fn epochs(&self) -> u64 {
        self.epochs
    }

    /// Depth of the leaves.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Label of the leaf of `epoch`.
    pub fn label(&self, epoch: u64) -> String {
        format!("{:0width$b}", epoch, width = self.depth)
    }

    /// Epoch of a leaf label.
    pub fn epoch_of(label: &str) -> Option<u64> {
        u64::from_str_radix(label, 2).ok()
    }

    /// Returns the key of `epoch`.
    pub fn epoch_key(&self, epoch: u64) -> Option<&[u8; KEY_BYTES]> {
        if epoch >= self.epochs {
            return None;
        }
        self.leaves.get(&self.label(epoch)).map(|k| &**k)
    }

    /// Returns the smallest set of nodes whose subtrees contain exactly the
    /// leaves of `epochs`, with their keys.
    pub fn cover(&self, epochs: &[u64]) -> Result<BTreeMap<String, Key>> {
        if let Some(e) = epochs.iter().find(|e| **e >= self.epochs) {
            return Err(Error::DefaultError(format!(
                "Invalid epoch {e}, the tree covers {} epochs",
                self.epochs
            )));
        }

        let mut labels = epochs.iter().map(|e| self.label(*e)).collect::<BTreeSet<_>>();
        for len in (1..=self.depth).rev() {
            let pairs = labels
                .iter()
                .filter(|l| l.len() == len && l.ends_with('0'))
                .map(|l| &l[..len - 1])
                .filter(|parent| labels.contains(&format!("{parent}1")))
                .map(str::to_string)
                .collect::<Vec<_>>();
            for parent in pairs {
                labels.remove(&format!("{parent}0"));
                labels.remove(&format!("{parent}1"));
                labels.insert(parent);
            }
        }

        labels
            .into_iter()
            .map(|label| {
                let source = if label.len() == self.depth {
                    &self.leaves
                } else {
                    &self.nodes
                };
                let key = source.get(&label).ok_or_else(|| missing(&label))?.clone();
                Ok((label, key))
            })
            .collect()
    }

    /// Derive the epoch keys below the node `label` of a tree of depth
    /// `depth`, given the key of that node.
    ///
    /// Returns the epoch keys labelled by their leaf labels.
    pub fn expand(
        label: &str,
        key: &[u8; KEY_BYTES],
        depth: usize,
    ) -> Result<BTreeMap<String, Key>> {
        check_label(label, depth)?;
        let mut level = BTreeMap::new();
        level.insert(label.to_string(), Zeroizing::new(*key));
        for _ in label.len()..depth {
            let mut next = BTreeMap::new();
            for (parent, parent_key) in &level {
                let (k0, k1) = children(parent, &parent_key[..])?;
                next.insert(format!("{parent}0"), k0);
                next.insert(format!("{parent}1"), k1);
            }
            level = next;
        }
        Ok(level)
    }
}

fn missing(label: &str) -> Error {
    Error::DefaultError(format!("Missing key for node {label:?}"))
}

#[cfg(test)]
mod tests {
    use super::KdfTree;
    use crate::kdf::kdf;
    use std::error::Error as StdError;

    #[test]
    fn structure() -> Result<(), Box<dyn StdError>> {
        let root = [2u8; 16];
        let tree = KdfTree::generate(&root, 8)?;
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.label(5), "101");
        assert_eq!(KdfTree::epoch_of("101"), Some(5));

        // The children of the root use the direction 0, and the children of
        // the node "1" the direction 1.
        let (dk0, dk1) = kdf(&root, 0)?;
        let (dk10, _) = kdf(&dk1[..], 1)?;
        let (_, sek101) = kdf(&dk10[..], 0)?;
        assert_eq!(tree.epoch_key(5), Some(&*sek101));
        let (dk00, _) = kdf(&dk0[..], 0)?;
        let (sek000, _) = kdf(&dk00[..], 0)?;
        assert_eq!(tree.epoch_key(0), Some(&*sek000));

        assert!(tree.epoch_key(8).is_none());
        Ok(())
    }

    #[test]
    fn partial_tree() -> Result<(), Box<dyn StdError>> {
        let tree = KdfTree::generate(&[3u8; 16], 5)?;
        assert_eq!(tree.depth(), 3);
        assert!(tree.epoch_key(4).is_some());
        assert!(tree.epoch_key(5).is_none());
        assert!(tree.cover(&[5]).is_err());
        assert!(KdfTree::generate(&[3u8; 16], 1).is_err());
        Ok(())
    }

    #[test]
    fn cover() -> Result<(), Box<dyn StdError>> {
        let tree = KdfTree::generate(&[4u8; 16], 8)?;

        let labels = |epochs: &[u64]| -> Result<Vec<String>, Box<dyn StdError>> {
            Ok(tree.cover(epochs)?.into_keys().collect())
        };
        assert_eq!(labels(&[1, 2])?, ["001", "010"]);
        assert_eq!(labels(&[2, 3])?, ["01"]);
        assert_eq!(labels(&[0, 1, 2, 3, 4])?, ["0", "100"]);
        assert_eq!(labels(&[0, 1, 2, 3, 4, 5, 6, 7])?, [""]);
        assert_eq!(labels(&[3, 4])?, ["011", "100"]);
        assert!(labels(&[])?.is_empty());
        Ok(())
    }

    #[test]
    fn expand_cover() -> Result<(), Box<dyn StdError>> {
        let tree = KdfTree::generate(&[5u8; 16], 16)?;
        let epochs = [2u64, 3, 4, 5, 6, 7, 9];
        let cover = tree.cover(&epochs)?;
        assert_eq!(cover.len(), 3);

        let mut received = Vec::new();
        for (label, key) in &cover {
            for (leaf, sek) in KdfTree::expand(label, key, tree.depth())? {
                let epoch = KdfTree::epoch_of(&leaf).ok_or("invalid label")?;
                assert_eq!(tree.epoch_key(epoch), Some(&*sek));
                received.push(epoch);
            }
        }
        assert_eq!(received, epochs);

        assert!(KdfTree::expand("0120", &[0u8; 16], 4).is_err());
        assert!(KdfTree::expand("01010", &[0u8; 16], 4).is_err());
        Ok(())
    }
}
