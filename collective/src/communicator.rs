use std::num::NonZeroUsize;

use log::debug;
use tokio::sync::mpsc::{self, Receiver, Sender};

use crate::{CollectiveErr, Result, WorkerSet};

const LINK_CAPACITY: usize = 16;

/// The rank that combines the flags of an `agree` before broadcasting the verdict.
const REDUCE_ROOT: usize = 0;

/// What travels over a link between two ranks.
#[derive(Debug)]
enum Msg<T> {
    Block(Vec<T>),
    Flag(bool),
}

impl<T> Msg<T> {
    fn kind(&self) -> &'static str {
        match self {
            Msg::Block(_) => "Block",
            Msg::Flag(_) => "Flag",
        }
    }
}

/// Both directions of the point to point channel with a single peer.
#[derive(Debug)]
struct Link<T> {
    tx: Sender<Msg<T>>,
    rx: Receiver<Msg<T>>,
}

/// Creates a fully connected set of `size` workers.
///
/// Every pair of ranks shares a FIFO link in each direction, so the n-th message a rank
/// receives from a peer always belongs to the n-th collective both executed.
///
/// # Arguments
/// * `size` - The amount of workers in the set.
///
/// # Returns
/// One `Communicator` per rank, ordered by rank.
pub fn world<T: Send>(size: NonZeroUsize) -> Vec<Communicator<T>> {
    let size = size.get();

    let mut txs: Vec<Vec<Option<Sender<Msg<T>>>>> = (0..size)
        .map(|_| (0..size).map(|_| None).collect())
        .collect();
    let mut rxs: Vec<Vec<Option<Receiver<Msg<T>>>>> = (0..size)
        .map(|_| (0..size).map(|_| None).collect())
        .collect();

    for src in 0..size {
        for dst in (0..size).filter(|&dst| dst != src) {
            let (tx, rx) = mpsc::channel(LINK_CAPACITY);
            txs[src][dst] = Some(tx);
            rxs[dst][src] = Some(rx);
        }
    }

    txs.into_iter()
        .zip(rxs)
        .enumerate()
        .map(|(rank, (txs, rxs))| {
            let links = txs
                .into_iter()
                .zip(rxs)
                .map(|(tx, rx)| Some(Link { tx: tx?, rx: rx? }))
                .collect();

            Communicator { rank, size, links }
        })
        .collect()
}

/// One rank's handle to an in-process worker set built by `world`.
#[derive(Debug)]
pub struct Communicator<T> {
    rank: usize,
    size: usize,
    links: Vec<Option<Link<T>>>,
}

impl<T> Communicator<T> {
    fn check_origin(&self, origin: usize) -> Result<()> {
        if origin >= self.size {
            return Err(CollectiveErr::InvalidOrigin {
                origin,
                size: self.size,
            });
        }

        Ok(())
    }

    fn check_layout(&self, op: &'static str, full: usize, block: usize) -> Result<()> {
        if block.checked_mul(self.size) != Some(full) {
            return Err(CollectiveErr::LayoutMismatch {
                op,
                full,
                block,
                size: self.size,
            });
        }

        Ok(())
    }

    fn link(&mut self, peer: usize) -> Result<&mut Link<T>> {
        self.links
            .get_mut(peer)
            .and_then(Option::as_mut)
            .ok_or(CollectiveErr::Disconnected { peer })
    }

    async fn send(&mut self, peer: usize, msg: Msg<T>) -> Result<()> {
        self.link(peer)?
            .tx
            .send(msg)
            .await
            .map_err(|_| CollectiveErr::Disconnected { peer })
    }

    async fn recv(&mut self, peer: usize) -> Result<Msg<T>> {
        self.link(peer)?
            .rx
            .recv()
            .await
            .ok_or(CollectiveErr::Disconnected { peer })
    }

    async fn recv_block(&mut self, peer: usize, op: &'static str, expected: usize) -> Result<Vec<T>> {
        match self.recv(peer).await? {
            Msg::Block(data) if data.len() == expected => Ok(data),
            Msg::Block(data) => Err(CollectiveErr::BlockSizeMismatch {
                peer,
                got: data.len(),
                expected,
            }),
            other => Err(CollectiveErr::UnexpectedMessage {
                peer,
                op,
                got: other.kind(),
            }),
        }
    }

    async fn recv_flag(&mut self, peer: usize) -> Result<bool> {
        match self.recv(peer).await? {
            Msg::Flag(flag) => Ok(flag),
            other => Err(CollectiveErr::UnexpectedMessage {
                peer,
                op: "agree",
                got: other.kind(),
            }),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> WorkerSet<T> for Communicator<T> {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    async fn scatter(&mut self, full: Option<&[T]>, block: &mut [T], origin: usize) -> Result<()> {
        self.check_origin(origin)?;
        let block_len = block.len();

        if self.rank != origin {
            let data = self.recv_block(origin, "scatter", block_len).await?;
            block.clone_from_slice(&data);
            return Ok(());
        }

        let full = full.ok_or(CollectiveErr::MissingBuffer {
            rank: self.rank,
            op: "scatter",
        })?;
        self.check_layout("scatter", full.len(), block_len)?;

        for peer in 0..self.size {
            let range = peer * block_len..(peer + 1) * block_len;

            if peer == self.rank {
                block.clone_from_slice(&full[range]);
            } else {
                self.send(peer, Msg::Block(full[range].to_vec())).await?;
            }
        }

        debug!("rank {origin} scattered {} blocks of {block_len}", self.size);
        Ok(())
    }

    async fn gather(&mut self, block: &[T], full: Option<&mut [T]>, origin: usize) -> Result<()> {
        self.check_origin(origin)?;
        let block_len = block.len();

        if self.rank != origin {
            return self.send(origin, Msg::Block(block.to_vec())).await;
        }

        let full = full.ok_or(CollectiveErr::MissingBuffer {
            rank: self.rank,
            op: "gather",
        })?;
        self.check_layout("gather", full.len(), block_len)?;

        for peer in 0..self.size {
            let range = peer * block_len..(peer + 1) * block_len;

            if peer == self.rank {
                full[range].clone_from_slice(block);
            } else {
                let data = self.recv_block(peer, "gather", block_len).await?;
                full[range].clone_from_slice(&data);
            }
        }

        debug!("rank {origin} gathered {} blocks of {block_len}", self.size);
        Ok(())
    }

    async fn agree(&mut self, local_ok: bool) -> Result<bool> {
        if self.rank != REDUCE_ROOT {
            self.send(REDUCE_ROOT, Msg::Flag(local_ok)).await?;
            return self.recv_flag(REDUCE_ROOT).await;
        }

        let mut ok = local_ok;
        for peer in 1..self.size {
            // Keep draining every flag so no peer is left with an unread message.
            ok &= self.recv_flag(peer).await?;
        }

        for peer in 1..self.size {
            self.send(peer, Msg::Flag(ok)).await?;
        }

        if !ok {
            debug!("worker set disagreed, {} ranks notified", self.size);
        }

        Ok(ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_of(size: usize) -> Vec<Communicator<f64>> {
        world(NonZeroUsize::new(size).unwrap())
    }

    #[test]
    fn mesh_links() {
        let comms = world_of(3);

        assert_eq!(comms.len(), 3);
        for (rank, comm) in comms.iter().enumerate() {
            assert_eq!(comm.rank(), rank);
            assert_eq!(comm.size(), 3);
            assert!(comm.links[rank].is_none());
            assert_eq!(comm.links.iter().filter(|l| l.is_some()).count(), 2);
        }
    }

    #[test]
    fn invalid_origin() {
        let comms = world_of(2);
        let err = comms[0].check_origin(2).unwrap_err();
        assert_eq!(err, CollectiveErr::InvalidOrigin { origin: 2, size: 2 });
    }

    #[test]
    fn layout() {
        let comms = world_of(4);
        assert!(comms[0].check_layout("scatter", 8, 2).is_ok());
        assert!(comms[0].check_layout("scatter", 0, 0).is_ok());
        assert!(comms[0].check_layout("scatter", 9, 2).is_err());
    }

    #[tokio::test]
    async fn single_rank() {
        let mut comm = world_of(1).pop().unwrap();
        let full = [1., 2., 3.];
        let mut block = [0.; 3];

        comm.scatter(Some(&full[..]), &mut block, 0).await.unwrap();
        assert_eq!(block, full);

        let mut out = [0.; 3];
        comm.gather(&block, Some(&mut out[..]), 0).await.unwrap();
        assert_eq!(out, full);

        assert!(comm.agree(true).await.unwrap());
        assert!(!comm.agree(false).await.unwrap());
    }

    #[tokio::test]
    async fn missing_buffer() {
        let mut comm = world_of(1).pop().unwrap();
        let mut block = [0.; 2];

        let err = comm.scatter(None, &mut block, 0).await.unwrap_err();
        assert_eq!(
            err,
            CollectiveErr::MissingBuffer {
                rank: 0,
                op: "scatter"
            }
        );
    }

    #[tokio::test]
    async fn disconnected_peer() {
        let mut comms = world_of(2);
        let mut second = comms.pop().unwrap();
        drop(comms);

        let mut block = [0.; 1];
        let err = second.scatter(None, &mut block, 0).await.unwrap_err();
        assert_eq!(err, CollectiveErr::Disconnected { peer: 0 });
    }
}
