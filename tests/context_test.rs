use std::sync::atomic::{AtomicUsize, Ordering};

use gridconv::context::DEFAULT_MAX_GROUP_SIZE;
use gridconv::{Backend, ComputeContext, ConvError, Shape};

#[test]
fn every_cell_runs_once() {
    for ctx in [ComputeContext::sequential(), ComputeContext::rayon(Some(4)).unwrap()] {
        let calls = AtomicUsize::new(0);
        let mut out = vec![(0usize, 0usize); 7 * 5];
        ctx.parallel_for_2d(Shape::new(7, 5), &mut out, |r, c| {
            calls.fetch_add(1, Ordering::Relaxed);
            (r, c)
        })
        .unwrap();
        assert_eq!(calls.load(Ordering::Relaxed), 35);
        for (idx, &(r, c)) in out.iter().enumerate() {
            assert_eq!((r, c), (idx / 5, idx % 5));
        }
    }
}

#[test]
fn parallel_map_fills_in_index_order() {
    let ctx = ComputeContext::rayon(Some(3)).unwrap();
    let mut out = vec![0u64; 1000];
    ctx.parallel_map(&mut out, |i| (i as u64) * 2).unwrap();
    assert!(out.iter().enumerate().all(|(i, &v)| v == i as u64 * 2));
}

#[test]
fn panicking_task_surfaces_execution_error() {
    for ctx in [ComputeContext::sequential(), ComputeContext::rayon(Some(2)).unwrap()] {
        let mut out = vec![0.0f32; 16];
        let err = ctx
            .parallel_for_2d(Shape::new(4, 4), &mut out, |r, c| {
                if r == 2 && c == 3 {
                    panic!("device fault");
                }
                1.0
            })
            .unwrap_err();
        match err {
            ConvError::Execution(msg) => assert!(msg.contains("device fault"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

#[test]
fn context_survives_a_fault() {
    let ctx = ComputeContext::rayon(Some(2)).unwrap();
    let mut out = vec![0i32; 8];
    assert!(ctx.parallel_map(&mut out, |_| -> i32 { panic!("boom") }).is_err());
    ctx.parallel_map(&mut out, |i| i as i32).unwrap();
    assert_eq!(out, vec![0, 1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn buffer_must_match_index_space() {
    let ctx = ComputeContext::sequential();
    let mut out = vec![0.0f32; 5];
    assert_eq!(
        ctx.parallel_for_2d(Shape::new(2, 3), &mut out, |_, _| 0.0),
        Err(ConvError::BufferSize { expected: 6, actual: 5 })
    );
}

#[test]
fn worker_counts() {
    assert_eq!(ComputeContext::sequential().workers(), 1);
    assert_eq!(ComputeContext::rayon(Some(3)).unwrap().workers(), 3);
    assert!(ComputeContext::rayon(None).unwrap().workers() >= 1);
}

#[test]
fn info_identifies_backend() {
    let ctx = ComputeContext::new(Backend::Rayon, Some(2)).unwrap();
    let info = ctx.info();
    assert_eq!(info.backend, Backend::Rayon);
    assert_eq!(info.workers, 2);
    assert!(info.host_parallelism >= 1);
    assert_eq!(info.max_group_size, Some(DEFAULT_MAX_GROUP_SIZE));
    assert!(info.to_string().contains("Running on"));
    assert!(info.to_string().contains(" Max group size: 1024"));

    let seq = ComputeContext::new(Backend::Sequential, Some(8)).unwrap();
    assert_eq!(seq.backend(), Backend::Sequential);
    assert_eq!(seq.info().workers, 1);
    assert_eq!(seq.info().max_group_size, None);
    assert!(seq.info().to_string().contains("Max group size: whole index space"));
}

#[test]
fn small_groups_still_cover_every_cell() {
    for size in [0, 1, 3, 64] {
        let ctx = ComputeContext::rayon(Some(3)).unwrap().with_max_group_size(size);
        assert_eq!(ctx.max_group_size(), Some(size.max(1)));
        assert_eq!(ctx.info().max_group_size, Some(size.max(1)));

        let calls = AtomicUsize::new(0);
        let mut out = vec![0usize; 9 * 11];
        ctx.parallel_for_2d(Shape::new(9, 11), &mut out, |r, c| {
            calls.fetch_add(1, Ordering::Relaxed);
            r * 11 + c
        })
        .unwrap();
        assert_eq!(calls.load(Ordering::Relaxed), 99);
        assert!(out.iter().enumerate().all(|(i, &v)| v == i));
    }
}
