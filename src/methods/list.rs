//! Chunked hash list.
//!
//! Input is cut into fixed-size blocks, each block is hashed on its own
//! and the list's digest is the primitive applied to the concatenated block
//! digests. The per-block digests stay available after finalization, so a
//! receiver can verify (or re-fetch) individual blocks.

use super::{HashNode, DEFAULT_BLOCK_SIZE, DEFAULT_PARALLEL_THRESHOLD};
use crate::engine::{Digest, StreamState};
use crate::error::{HashError, Result};
use rayon::prelude::*;
use std::ops::Index;

/// Per-block digests plus a top digest over them.
#[derive(Debug, Clone)]
pub struct HashList {
    primitive: Box<dyn Digest>,
    block_size: usize,
    parallel_threshold: usize,
    current: Box<dyn Digest>,
    pending: usize,
    position: u64,
    nodes: Vec<HashNode>,
    state: StreamState,
}

impl HashList {
    /// List over `primitive` with blocks of `block_size` bytes
    pub fn new(primitive: Box<dyn Digest>, block_size: usize) -> Result<Self> {
        if block_size == 0 {
            return Err(HashError::validation("hash list block size must be positive"));
        }
        let primitive = primitive.fresh();
        Ok(Self {
            current: primitive.fresh(),
            primitive,
            block_size,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            pending: 0,
            position: 0,
            nodes: Vec::new(),
            state: StreamState::Ready,
        })
    }

    /// List over `primitive` with the default 1024-byte blocks
    pub fn with_primitive(primitive: Box<dyn Digest>) -> Self {
        Self {
            current: primitive.fresh(),
            primitive: primitive.fresh(),
            block_size: DEFAULT_BLOCK_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            pending: 0,
            position: 0,
            nodes: Vec::new(),
            state: StreamState::Ready,
        }
    }

    /// Inputs at least this long are hashed block-parallel by [`HashList::compute_hash`]
    pub fn with_parallel_threshold(mut self, bytes: usize) -> Self {
        self.parallel_threshold = bytes;
        self
    }

    /// Algorithm applied to every block
    pub fn primitive(&self) -> &dyn Digest {
        self.primitive.as_ref()
    }

    /// Number of block digests recorded so far
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when no block has been hashed
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Block digest `index`
    pub fn get(&self, index: usize) -> Result<&HashNode> {
        self.nodes
            .get(index)
            .ok_or_else(|| HashError::bounds(index, self.nodes.len()))
    }

    /// Block digests in input order
    pub fn iter(&self) -> std::slice::Iter<'_, HashNode> {
        self.nodes.iter()
    }

    /// One-shot: hash `data`, returning the top digest.
    ///
    /// Large inputs hash their blocks in parallel.
    pub fn compute_hash(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        if data.len() < self.parallel_threshold {
            return self.compute(data);
        }
        self.reset();
        let workers: Vec<Box<dyn Digest>> = (0..data.len().div_ceil(self.block_size))
            .map(|_| self.primitive.fresh())
            .collect();
        let block_size = self.block_size;
        let digests = workers
            .into_par_iter()
            .zip(data.par_chunks(block_size))
            .map(|(mut worker, block)| worker.compute(block))
            .collect::<Result<Vec<_>>>()?;

        for (i, digest) in digests.into_iter().enumerate() {
            let start = (i * block_size) as i64;
            let len = block_size.min(data.len() - i * block_size) as i64;
            self.nodes.push(HashNode::spanning(digest, start, start + len - 1));
        }
        self.position = data.len() as u64;
        self.state.begin(|| self.primitive.name())?;
        self.finalize()
    }

    fn close_block(&mut self) -> Result<()> {
        let digest = self.current.finalize()?;
        self.current.reset();
        let end = self.position as i64 - 1;
        let start = end - self.pending as i64 + 1;
        self.nodes.push(HashNode::spanning(digest, start, end));
        self.pending = 0;
        Ok(())
    }
}

impl Digest for HashList {
    fn name(&self) -> String {
        format!("HashList<{}>", self.primitive.name())
    }

    fn block_size(&self) -> usize {
        self.block_size
    }

    fn output_size(&self) -> usize {
        self.primitive.output_size()
    }

    fn update(&mut self, mut data: &[u8]) -> Result<()> {
        self.state.begin(|| self.primitive.name())?;
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
        self.state.finish(|| self.primitive.name())?;
        if self.pending > 0 {
            self.close_block()?;
        }
        let mut top = self.primitive.fresh();
        for node in &self.nodes {
            top.update(node.digest())?;
        }
        tracing::debug!(
            algorithm = %self.primitive.name(),
            blocks = self.nodes.len(),
            bytes = self.position,
            "hash list complete"
        );
        top.finalize()
    }

    fn reset(&mut self) {
        self.current.reset();
        self.pending = 0;
        self.position = 0;
        self.nodes.clear();
        self.state = StreamState::Ready;
    }

    fn box_clone(&self) -> Box<dyn Digest> {
        Box::new(self.clone())
    }
}

impl Index<usize> for HashList {
    type Output = HashNode;

    fn index(&self, index: usize) -> &HashNode {
        &self.nodes[index]
    }
}

impl<'a> IntoIterator for &'a HashList {
    type Item = &'a HashNode;
    type IntoIter = std::slice::Iter<'a, HashNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::crc;
    use crate::params::{CrcStandard, Standard};
    use crate::primitives::{Md5, Sha1};

    const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    const CRC32_LEAVES: [&str; 7] = [
        "321E6D05", "3CDEC33B", "67C2DCD1", "B280DEC1", "9B11CF41", "C4F96AF3", "0943260C",
    ];

    const MD5_LEAVES: [&str; 7] = [
        "E86410FA2D6E2634FD8AC5F4B3AFE7F3",
        "D123D9C26465577A2D10958881C9B31A",
        "0203F00980F0FBC9ED4DA0516D718DB0",
        "E1B96525C4675C0D15CE2F93F4C6B902",
        "2F241F38B6985B4C9EAE4321A6203B4C",
        "81AA85A65DE320FBB0C24EA4B8E296D8",
        "7647966B7343C29048673252E490F736",
    ];

    fn crc32_list() -> HashList {
        HashList::new(Box::new(crc(CrcStandard::Crc32.parameters())), 10).unwrap()
    }

    fn leaves(list: &HashList) -> Vec<String> {
        list.iter().map(|n| hex::encode_upper(n.digest())).collect()
    }

    #[test]
    fn test_crc32_leaves() {
        let mut list = crc32_list();
        let top = list.compute(ALPHANUMERIC).unwrap();
        assert_eq!(hex::encode_upper(top), "4C26B5E2");
        assert_eq!(leaves(&list), CRC32_LEAVES);
        assert_eq!(list.block_size(), 10);
    }

    #[test]
    fn test_md5_leaves() {
        let mut list = HashList::new(Box::new(Md5::default()), 10).unwrap();
        let top = list.compute(ALPHANUMERIC).unwrap();
        assert_eq!(hex::encode_upper(top), "3C3C68010BAC0A8CDA33E2BD74538256");
        assert_eq!(leaves(&list), MD5_LEAVES);
    }

    #[test]
    fn test_ranges() {
        let mut list = crc32_list();
        list.compute(ALPHANUMERIC).unwrap();
        assert_eq!(list.len(), 7);
        assert_eq!(list[0].range_start(), 0);
        assert_eq!(list[0].range_end(), 9);
        assert_eq!(list[6].range_start(), 60);
        assert_eq!(list[6].range_end(), 61);
        assert_eq!(list[6].count(), 2);
    }

    #[test]
    fn test_out_of_range_index() {
        let mut list = crc32_list();
        list.compute(ALPHANUMERIC).unwrap();
        assert!(matches!(list.get(7), Err(HashError::Bounds { index: 7, len: 7 })));
        assert!(list.get(6).is_ok());
    }

    #[test]
    fn test_zero_block_size_rejected() {
        let result = HashList::new(Box::new(Md5::default()), 0);
        assert!(matches!(result, Err(HashError::Validation(_))));
    }

    #[test]
    fn test_default_block_size() {
        let list = HashList::with_primitive(Box::new(Sha1::default()));
        assert_eq!(list.block_size(), 1024);
        assert_eq!(list.output_size(), 20);
    }

    #[test]
    fn test_streaming_matches_one_shot() {
        let mut list = crc32_list();
        for chunk in ALPHANUMERIC.chunks(3) {
            list.update(chunk).unwrap();
        }
        assert_eq!(hex::encode_upper(list.finalize().unwrap()), "4C26B5E2");
        assert_eq!(leaves(&list), CRC32_LEAVES);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        let mut sequential = HashList::new(Box::new(Md5::default()), 100).unwrap();
        let mut parallel = sequential.clone().with_parallel_threshold(0);

        let expected = sequential.compute(&data).unwrap();
        assert_eq!(parallel.compute_hash(&data).unwrap(), expected);
        assert_eq!(parallel.len(), 100);
        assert_eq!(parallel[99], sequential[99]);
    }

    #[test]
    fn test_iteration() {
        let mut list = crc32_list();
        list.compute(ALPHANUMERIC).unwrap();
        let mut count = 0;
        for node in &list {
            assert_eq!(hex::encode_upper(node.digest()), CRC32_LEAVES[count]);
            count += 1;
        }
        assert_eq!(count, 7);
    }

    #[test]
    fn test_empty_input() {
        let mut list = HashList::new(Box::new(Md5::default()), 10).unwrap();
        let top = list.compute(b"").unwrap();
        assert!(list.is_empty());
        assert_eq!(hex::encode_upper(top), "D41D8CD98F00B204E9800998ECF8427E");
    }
}
