use std::{future::Future, num::NonZeroUsize, time::Duration};

use collective::{CollectiveErr, Communicator, WorkerSet};
use tokio::time;

const DEADLINE: Duration = Duration::from_secs(5);

/// Runs `body` once per rank on its own task and returns the outputs ordered by rank.
async fn run_world<F, Fut, O>(size: usize, body: F) -> Vec<O>
where
    F: Fn(Communicator<f64>) -> Fut,
    Fut: Future<Output = O> + Send + 'static,
    O: Send + 'static,
{
    let comms = collective::world(NonZeroUsize::new(size).unwrap());
    let handles: Vec<_> = comms.into_iter().map(|c| tokio::spawn(body(c))).collect();

    let joined = time::timeout(DEADLINE, futures::future::join_all(handles))
        .await
        .expect("worker set deadlocked");

    joined.into_iter().map(|r| r.unwrap()).collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn scatter_then_gather() {
    const SIZE: usize = 4;
    const BLOCK: usize = 3;

    let outputs = run_world(SIZE, |mut comm| async move {
        let full: Vec<f64> = (0..SIZE * BLOCK).map(|i| i as f64).collect();
        let is_origin = comm.rank() == 0;

        let mut block = vec![0.; BLOCK];
        comm.scatter(is_origin.then_some(&full[..]), &mut block, 0)
            .await
            .unwrap();

        let start = (comm.rank() * BLOCK) as f64;
        assert_eq!(block, [start, start + 1., start + 2.]);

        for v in block.iter_mut() {
            *v *= 2.;
        }

        let mut out = vec![0.; SIZE * BLOCK];
        comm.gather(&block, is_origin.then_some(&mut out[..]), 0)
            .await
            .unwrap();

        is_origin.then_some(out)
    })
    .await;

    let expected: Vec<f64> = (0..SIZE * BLOCK).map(|i| 2. * i as f64).collect();
    assert_eq!(outputs[0].as_deref(), Some(&expected[..]));
    assert!(outputs[1..].iter().all(Option::is_none));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn non_zero_origin() {
    const SIZE: usize = 3;
    const ORIGIN: usize = 2;

    let outputs = run_world(SIZE, |mut comm| async move {
        let full = [10., 20., 30.];
        let mut block = [0.];

        let is_origin = comm.rank() == ORIGIN;
        comm.scatter(is_origin.then_some(&full[..]), &mut block, ORIGIN)
            .await
            .unwrap();

        let mut out = [0.; SIZE];
        comm.gather(&block, is_origin.then_some(&mut out[..]), ORIGIN)
            .await
            .unwrap();

        (block[0], is_origin.then_some(out))
    })
    .await;

    assert_eq!(outputs[0].0, 10.);
    assert_eq!(outputs[1].0, 20.);
    assert_eq!(outputs[2].0, 30.);
    assert_eq!(outputs[ORIGIN].1, Some([10., 20., 30.]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn agree_is_logical_and() {
    const SIZE: usize = 4;

    let outputs = run_world(SIZE, |mut comm| async move {
        let everyone = comm.agree(true).await.unwrap();
        let local_ok = comm.rank() != 2;
        let one_fails = comm.agree(local_ok).await.unwrap();
        let again = comm.agree(true).await.unwrap();
        (everyone, one_fails, again)
    })
    .await;

    assert!(outputs.iter().all(|&o| o == (true, false, true)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn mismatched_block_len() {
    let outputs = run_world(2, |mut comm| async move {
        let full = [1., 2., 3., 4.];

        if comm.rank() == 0 {
            let mut block = [0.; 2];
            comm.scatter(Some(&full[..]), &mut block, 0).await
        } else {
            let mut block = [0.; 1];
            comm.scatter(None, &mut block, 0).await
        }
    })
    .await;

    assert!(outputs[0].is_ok());
    assert_eq!(
        outputs[1],
        Err(CollectiveErr::BlockSizeMismatch {
            peer: 0,
            got: 2,
            expected: 1,
        })
    );
}

#[tokio::test]
async fn uneven_layout() {
    let mut comms = collective::world::<f64>(NonZeroUsize::new(1).unwrap());
    let mut comm = comms.pop().unwrap();

    let full = [1., 2., 3.];
    let mut block = [0.; 2];
    let err = comm.scatter(Some(&full[..]), &mut block, 0).await.unwrap_err();

    assert!(matches!(err, CollectiveErr::LayoutMismatch { full: 3, block: 2, .. }));
}
