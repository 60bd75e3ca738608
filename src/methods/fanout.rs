//! Fan-out combinators.
//!
//! [`MultiHash`] and [`ParallelHash`] broadcast every update to an ordered
//! set of member digests. Once the first update has been delivered the
//! member set and its order are frozen until the computation is finalized
//! or reset.

use super::DEFAULT_PARALLEL_THRESHOLD;
use crate::engine::{Digest, StreamState};
use crate::error::{HashError, Result};
use rayon::prelude::*;

/// Ordered members plus the streaming lock shared by both combinators
#[derive(Debug, Clone)]
struct FanOut {
    kind: &'static str,
    members: Vec<Box<dyn Digest>>,
    parallel_threshold: usize,
    state: StreamState,
}

impl FanOut {
    fn new(kind: &'static str, members: Vec<Box<dyn Digest>>) -> Result<Self> {
        if members.is_empty() {
            return Err(HashError::validation(format!(
                "{kind} needs at least one member digest"
            )));
        }
        Ok(Self {
            kind,
            members: members.into_iter().map(|m| m.fresh()).collect(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            state: StreamState::Ready,
        })
    }

    fn name(&self) -> String {
        let names: Vec<String> = self.members.iter().map(|m| m.name()).collect();
        format!("{}({})", self.kind, names.join(", "))
    }

    fn ensure_unlocked(&self, operation: &str) -> Result<()> {
        if self.state.is_streaming() {
            tracing::warn!(kind = self.kind, operation, "member set is locked while streaming");
            return Err(HashError::state_violation(format!(
                "{}: cannot {operation} members after hashing has started",
                self.kind
            )));
        }
        Ok(())
    }

    fn add(&mut self, digest: Box<dyn Digest>) -> Result<()> {
        self.ensure_unlocked("add")?;
        self.members.push(digest.fresh());
        Ok(())
    }

    fn remove(&mut self, index: usize) -> Result<Box<dyn Digest>> {
        self.ensure_unlocked("remove")?;
        if index >= self.members.len() {
            return Err(HashError::bounds(index, self.members.len()));
        }
        if self.members.len() == 1 {
            return Err(HashError::validation(format!(
                "{}: cannot remove the last member digest",
                self.kind
            )));
        }
        Ok(self.members.remove(index))
    }

    fn reverse(&mut self) -> Result<()> {
        self.ensure_unlocked("reorder")?;
        self.members.reverse();
        Ok(())
    }

    fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        self.ensure_unlocked("reorder")?;
        let len = self.members.len();
        for index in [a, b] {
            if index >= len {
                return Err(HashError::bounds(index, len));
            }
        }
        self.members.swap(a, b);
        Ok(())
    }

    fn update(&mut self, data: &[u8]) -> Result<()> {
        let kind = self.kind;
        self.state.begin(|| kind.to_string())?;
        if data.len() >= self.parallel_threshold && self.members.len() > 1 {
            self.members.par_iter_mut().try_for_each(|m| m.update(data))
        } else {
            self.members.iter_mut().try_for_each(|m| m.update(data))
        }
    }

    fn finalize(&mut self) -> Result<Vec<Vec<u8>>> {
        let kind = self.kind;
        self.state.finish(|| kind.to_string())?;
        let digests = self
            .members
            .iter_mut()
            .map(|m| m.finalize())
            .collect::<Result<Vec<_>>>()?;
        for member in &mut self.members {
            member.reset();
        }
        Ok(digests)
    }

    fn reset(&mut self) {
        for member in &mut self.members {
            member.reset();
        }
        self.state = StreamState::Ready;
    }
}

macro_rules! fan_out_api {
    ($name:ident) => {
        impl $name {
            /// Member digests in output order
            pub fn members(&self) -> &[Box<dyn Digest>] {
                &self.0.members
            }

            /// Number of member digests
            pub fn len(&self) -> usize {
                self.0.members.len()
            }

            /// Always false; a combinator keeps at least one member
            pub fn is_empty(&self) -> bool {
                self.0.members.is_empty()
            }

            /// Append a member. Fails once hashing has started.
            pub fn add(&mut self, digest: Box<dyn Digest>) -> Result<()> {
                self.0.add(digest)
            }

            /// Remove and return member `index`. Fails once hashing has
            /// started, or when it is the only member.
            pub fn remove(&mut self, index: usize) -> Result<Box<dyn Digest>> {
                self.0.remove(index)
            }

            /// Reverse the member order. Fails once hashing has started.
            pub fn reverse(&mut self) -> Result<()> {
                self.0.reverse()
            }

            /// Exchange two members. Fails once hashing has started.
            pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
                self.0.swap(a, b)
            }

            /// Updates at least this long are broadcast to members in parallel
            pub fn with_parallel_threshold(mut self, bytes: usize) -> Self {
                self.0.parallel_threshold = bytes;
                self
            }
        }
    };
}

/// Concatenation of member digests, in member order.
#[derive(Debug, Clone)]
pub struct MultiHash(FanOut);

impl MultiHash {
    /// Combine `members`; an empty set is rejected
    pub fn new(members: Vec<Box<dyn Digest>>) -> Result<Self> {
        FanOut::new("MultiHash", members).map(Self)
    }
}

fan_out_api!(MultiHash);

impl Digest for MultiHash {
    fn name(&self) -> String {
        self.0.name()
    }

    fn block_size(&self) -> usize {
        self.0.members.iter().map(|m| m.block_size()).max().unwrap_or(1)
    }

    fn output_size(&self) -> usize {
        self.0.members.iter().map(|m| m.output_size()).sum()
    }

    fn update(&mut self, data: &[u8]) -> Result<()> {
        self.0.update(data)
    }

    fn finalize(&mut self) -> Result<Vec<u8>> {
        Ok(self.0.finalize()?.concat())
    }

    fn reset(&mut self) {
        self.0.reset();
    }

    fn box_clone(&self) -> Box<dyn Digest> {
        Box::new(self.clone())
    }
}

/// XOR of member digests into a buffer as wide as the widest member.
///
/// Narrower members contribute to the leading bytes only.
#[derive(Debug, Clone)]
pub struct ParallelHash(FanOut);

impl ParallelHash {
    /// Combine `members`; an empty set is rejected
    pub fn new(members: Vec<Box<dyn Digest>>) -> Result<Self> {
        FanOut::new("ParallelHash", members).map(Self)
    }
}

fan_out_api!(ParallelHash);

impl Digest for ParallelHash {
    fn name(&self) -> String {
        self.0.name()
    }

    fn block_size(&self) -> usize {
        self.0.members.iter().map(|m| m.block_size()).max().unwrap_or(1)
    }

    fn output_size(&self) -> usize {
        self.0.members.iter().map(|m| m.output_size()).max().unwrap_or(0)
    }

    fn update(&mut self, data: &[u8]) -> Result<()> {
        self.0.update(data)
    }

    fn finalize(&mut self) -> Result<Vec<u8>> {
        let mut out = vec![0u8; self.output_size()];
        for digest in self.0.finalize()? {
            for (o, d) in out.iter_mut().zip(&digest) {
                *o ^= d;
            }
        }
        Ok(out)
    }

    fn reset(&mut self) {
        self.0.reset();
    }

    fn box_clone(&self) -> Box<dyn Digest> {
        Box::new(self.clone())
    }
}
