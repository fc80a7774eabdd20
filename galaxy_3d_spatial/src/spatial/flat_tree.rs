/// Implicit binary tree stored in two parallel flat arrays.
///
/// Node `i` owns `boxes[6 * i .. 6 * i + 6]` (tree frame) and `tags[i]`.
/// A group node is immediately followed by its whole left subtree and then
/// its whole right subtree, so `i + span` is the first node after the
/// subtree rooted at `i`. For `N` leaves there are exactly `2N - 1` nodes.

use crate::bounds::{self, BoxView};

/// Leaf/group discriminant of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTag {
    /// Terminal node holding one sample id
    Leaf(u32),
    /// Internal node; the payload is the node count of its subtree,
    /// including itself
    Group(u32),
}

impl NodeTag {
    /// `true` for `Leaf`.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, NodeTag::Leaf(_))
    }

    /// Number of nodes covered by this node's subtree (1 for a leaf).
    #[inline]
    pub fn span(&self) -> usize {
        match *self {
            NodeTag::Leaf(_) => 1,
            NodeTag::Group(count) => count as usize,
        }
    }
}

/// Read-only flat BVH.
#[derive(Debug, Clone)]
pub struct FlatTree {
    boxes: Vec<f64>,
    tags: Vec<NodeTag>,
}

impl FlatTree {
    pub(crate) fn from_parts(boxes: Vec<f64>, tags: Vec<NodeTag>) -> Self {
        debug_assert_eq!(boxes.len(), tags.len() * bounds::BOX_STRIDE);
        Self { boxes, tags }
    }

    /// Total number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.tags.len()
    }

    /// Number of leaves (`(node_count + 1) / 2`).
    pub fn leaf_count(&self) -> usize {
        (self.tags.len() + 1) / 2
    }

    /// Tag of node `index`.
    #[inline]
    pub fn tag(&self, index: usize) -> NodeTag {
        self.tags[index]
    }

    /// Box of node `index` in the tree frame.
    #[inline]
    pub fn bounds(&self, index: usize) -> BoxView<'_> {
        bounds::slot(&self.boxes, index)
    }

    /// All tags in layout order.
    pub fn tags(&self) -> &[NodeTag] {
        &self.tags
    }

    /// Index of the left and right child of group `index`, `None` for leaves.
    pub fn children(&self, index: usize) -> Option<(usize, usize)> {
        match self.tags[index] {
            NodeTag::Leaf(_) => None,
            NodeTag::Group(_) => {
                let left = index + 1;
                Some((left, left + self.tags[left].span()))
            }
        }
    }

    /// Sample ids of every leaf in the subtree rooted at `index`.
    pub fn leaves_under(&self, index: usize) -> impl Iterator<Item = u32> + '_ {
        let end = index + self.tags[index].span();
        self.tags[index..end].iter().filter_map(|tag| match *tag {
            NodeTag::Leaf(sample) => Some(sample),
            NodeTag::Group(_) => None,
        })
    }

    /// Depth of the deepest leaf (root = 0).
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        // (node, depth)
        let mut stack = vec![(0usize, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            match self.children(node) {
                Some((left, right)) => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
                None => deepest = deepest.max(depth),
            }
        }
        deepest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hand-built tree:  G(5) → [L0, G(3) → [L1, L2]]
    fn small_tree() -> FlatTree {
        let tags = vec![
            NodeTag::Group(5),
            NodeTag::Leaf(0),
            NodeTag::Group(3),
            NodeTag::Leaf(1),
            NodeTag::Leaf(2),
        ];
        FlatTree::from_parts(vec![0.0; 5 * 6], tags)
    }

    #[test]
    fn test_span() {
        assert_eq!(NodeTag::Leaf(42).span(), 1);
        assert_eq!(NodeTag::Group(7).span(), 7);
        assert!(NodeTag::Leaf(0).is_leaf());
        assert!(!NodeTag::Group(3).is_leaf());
    }

    #[test]
    fn test_children() {
        let tree = small_tree();
        assert_eq!(tree.children(0), Some((1, 2)));
        assert_eq!(tree.children(2), Some((3, 4)));
        assert_eq!(tree.children(1), None);
    }

    #[test]
    fn test_leaves_under() {
        let tree = small_tree();
        assert_eq!(tree.leaves_under(0).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(tree.leaves_under(2).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(tree.leaves_under(4).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_counts_and_depth() {
        let tree = small_tree();
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.depth(), 2);
    }
}
