//! Merkle hash tree (THEX layout).
//!
//! Leaves hash `0x00 || block`, internal nodes hash `0x01 || left || right`.
//! Nodes pair left to right; an unpaired trailing node is promoted to the
//! next level unchanged. The tree is built while streaming: completed
//! subtrees sit on a stack and merge as soon as a sibling of equal height
//! completes, so memory stays logarithmic in the input length apart from
//! the retained nodes themselves.

use super::{HashNode, DEFAULT_BLOCK_SIZE};
use crate::engine::{Digest, StreamState};
use crate::error::{HashError, Result};

const LEAF_PREFIX: u8 = 0x00;
const INTERNAL_PREFIX: u8 = 0x01;

/// Index of a node inside a [`HashTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position in the tree's node arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// A tree node and its links.
///
/// Links are set once when the parent is built, children before parents,
/// so the structure can never contain a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    hash: HashNode,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl TreeNode {
    fn leaf(hash: HashNode) -> Self {
        Self {
            hash,
            parent: None,
            left: None,
            right: None,
        }
    }

    /// Digest and covered range
    pub fn hash(&self) -> &HashNode {
        &self.hash
    }

    /// Digest bytes
    pub fn digest(&self) -> &[u8] {
        self.hash.digest()
    }

    /// Parent node, `None` for the root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Left child, `None` for leaves
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// Right child, `None` for leaves
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// True for block digests
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Incremental Merkle tree over fixed-size blocks.
#[derive(Debug, Clone)]
pub struct HashTree {
    primitive: Box<dyn Digest>,
    block_size: usize,
    current: Box<dyn Digest>,
    pending: usize,
    position: u64,
    nodes: Vec<TreeNode>,
    leaves: Vec<NodeId>,
    // completed subtrees as (height, root), heights strictly decreasing
    stack: Vec<(u32, NodeId)>,
    root: Option<NodeId>,
    state: StreamState,
}

impl HashTree {
    /// Tree over `primitive` with blocks of `block_size` bytes
    pub fn new(primitive: Box<dyn Digest>, block_size: usize) -> Result<Self> {
        if block_size == 0 {
            return Err(HashError::validation("hash tree block size must be positive"));
        }
        let primitive = primitive.fresh();
        Ok(Self {
            current: primitive.fresh(),
            primitive,
            block_size,
            pending: 0,
            position: 0,
            nodes: Vec::new(),
            leaves: Vec::new(),
            stack: Vec::new(),
            root: None,
            state: StreamState::Ready,
        })
    }

    /// Tree over `primitive` with the default 1024-byte blocks
    pub fn with_primitive(primitive: Box<dyn Digest>) -> Self {
        let primitive = primitive.fresh();
        Self {
            current: primitive.fresh(),
            primitive,
            block_size: DEFAULT_BLOCK_SIZE,
            pending: 0,
            position: 0,
            nodes: Vec::new(),
            leaves: Vec::new(),
            stack: Vec::new(),
            root: None,
            state: StreamState::Ready,
        }
    }

    /// Algorithm applied to blocks and node pairs
    pub fn primitive(&self) -> &dyn Digest {
        self.primitive.as_ref()
    }

    /// Root of the last finalized tree
    pub fn root(&self) -> Option<&TreeNode> {
        self.root.map(|id| &self.nodes[id.0])
    }

    /// Id of the root of the last finalized tree
    pub fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    /// Node `id`
    pub fn node(&self, id: NodeId) -> Result<&TreeNode> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| HashError::bounds(id.0, self.nodes.len()))
    }

    /// Block digests in input order
    pub fn leaves(&self) -> impl Iterator<Item = &TreeNode> + '_ {
        self.leaves.iter().map(move |id| &self.nodes[id.0])
    }

    /// Ids of the block digests in input order
    pub fn leaf_ids(&self) -> &[NodeId] {
        &self.leaves
    }

    /// Number of nodes built so far
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn push(&mut self, node: TreeNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn start_block(&mut self) -> Result<()> {
        self.current.reset();
        self.current.update(&[LEAF_PREFIX])
    }

    fn close_block(&mut self) -> Result<()> {
        let digest = self.current.finalize()?;
        let end = self.position as i64 - 1;
        let start = end - self.pending as i64 + 1;
        let id = self.push(TreeNode::leaf(HashNode::spanning(digest, start, end)));
        self.leaves.push(id);
        self.pending = 0;

        let mut height = 0;
        let mut right = id;
        while let Some(&(top, left)) = self.stack.last() {
            if top != height {
                break;
            }
            self.stack.pop();
            right = self.join(left, right)?;
            height += 1;
        }
        self.stack.push((height, right));
        self.start_block()
    }

    fn join(&mut self, left: NodeId, right: NodeId) -> Result<NodeId> {
        let mut digest = self.primitive.fresh();
        digest.update(&[INTERNAL_PREFIX])?;
        digest.update(self.nodes[left.0].digest())?;
        digest.update(self.nodes[right.0].digest())?;
        let range = HashNode::spanning(
            digest.finalize()?,
            self.nodes[left.0].hash.range_start(),
            self.nodes[right.0].hash.range_end(),
        );
        let id = self.push(TreeNode {
            hash: range,
            parent: None,
            left: Some(left),
            right: Some(right),
        });
        self.nodes[left.0].parent = Some(id);
        self.nodes[right.0].parent = Some(id);
        Ok(id)
    }
}

impl Digest for HashTree {
    fn name(&self) -> String {
        format!("HashTree<{}>", self.primitive.name())
    }

    fn block_size(&self) -> usize {
        self.block_size
    }

    fn output_size(&self) -> usize {
        self.primitive.output_size()
    }

    fn update(&mut self, mut data: &[u8]) -> Result<()> {
        if !self.state.is_streaming() {
            self.state.begin(|| self.primitive.name())?;
            self.start_block()?;
        }
        while !data.is_empty() {
            let take = (self.block_size - self.pending).min(data.len());
            self.current.update(&data[..take])?;
            self.pending += take;
            self.position += take as u64;
            data = &data[take..];
            if self.pending == self.block_size {
                self.close_block()?;
            }
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<Vec<u8>> {
        if !self.state.is_streaming() {
            self.state.begin(|| self.primitive.name())?;
            self.start_block()?;
        }
        self.state.finish(|| self.primitive.name())?;
        if self.pending > 0 || self.leaves.is_empty() {
            self.close_block()?;
        }
        self.current.reset();

        // Fold the remaining subtrees right to left; this is exactly the
        // promotion of unpaired nodes in level-by-level pairing.
        let mut root = match self.stack.pop() {
            Some((_, id)) => id,
            None => return Err(HashError::state_violation("hash tree has no leaves")),
        };
        while let Some((_, left)) = self.stack.pop() {
            root = self.join(left, root)?;
        }
        self.root = Some(root);

        tracing::debug!(
            algorithm = %self.primitive.name(),
            leaves = self.leaves.len(),
            nodes = self.nodes.len(),
            "hash tree complete"
        );
        Ok(self.nodes[root.0].digest().to_vec())
    }

    fn reset(&mut self) {
        self.current.reset();
        self.pending = 0;
        self.position = 0;
        self.nodes.clear();
        self.leaves.clear();
        self.stack.clear();
        self.root = None;
        self.state = StreamState::Ready;
    }

    fn box_clone(&self) -> Box<dyn Digest> {
        Box::new(self.clone())
    }
}
