use kernel_sync::{Interrupted, SpinMutex, Task};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::{panic, thread};

#[test]
fn basic_lock_and_raii() {
    let m = SpinMutex::new(0_u32);

    {
        let mut g = m.lock();
        *g = 41;
    }

    // previous drop must have unlocked
    {
        let mut g = m.lock();
        *g += 1;
        assert_eq!(*g, 42);
    }
}

#[test]
fn try_lock_semantics() {
    let m = SpinMutex::new(1u8);

    let g1 = m.try_lock();
    assert!(g1.is_some());
    assert!(m.try_lock().is_none());

    drop(g1);
    assert!(m.try_lock().is_some());
}

#[test]
fn interrupted_waiter_leaves_value_alone() {
    let m = Arc::new(SpinMutex::new(5_i32));
    let task = Arc::new(Task::new("writer"));
    let holder = m.lock();

    let waiter = {
        let m = Arc::clone(&m);
        let task = Arc::clone(&task);
        thread::spawn(move || match m.lock_interruptible(&task) {
            Ok(mut g) => {
                *g = 99;
                Ok(())
            }
            Err(e) => Err(e),
        })
    };

    // The waiter is spinning on the held lock; deliver a signal.
    thread::sleep(std::time::Duration::from_millis(10));
    task.raise_signal();

    assert_eq!(waiter.join().unwrap(), Err(Interrupted));
    drop(holder);
    assert_eq!(*m.lock(), 5);
}

#[test]
fn waiter_without_signal_gets_the_lock_after_release() {
    let m = Arc::new(SpinMutex::new(0_u32));
    let task = Arc::new(Task::new("patient"));
    let holder = m.lock();

    let waiter = {
        let m = Arc::clone(&m);
        let task = Arc::clone(&task);
        thread::spawn(move || {
            let mut g = m.lock_interruptible(&task)?;
            *g += 1;
            Ok::<_, Interrupted>(*g)
        })
    };

    thread::sleep(std::time::Duration::from_millis(5));
    drop(holder);
    assert_eq!(waiter.join().unwrap(), Ok(1));
}

#[test]
fn contended_increments_are_exact_and_exclusive() {
    let threads = 8;
    let iters = 2_000;

    let lock = Arc::new(SpinMutex::new(0usize));
    let in_cs = Arc::new(AtomicUsize::new(0));
    let start = Arc::new(Barrier::new(threads));

    let mut handles = Vec::with_capacity(threads);
    for i in 0..threads {
        let lock = Arc::clone(&lock);
        let in_cs = Arc::clone(&in_cs);
        let start = Arc::clone(&start);
        handles.push(thread::spawn(move || {
            let task = Task::new("incrementer");
            start.wait();
            for _ in 0..iters {
                // mix both acquisition paths
                let mut g = if i % 2 == 0 {
                    lock.lock()
                } else {
                    lock.lock_interruptible(&task).unwrap()
                };
                let prev = in_cs.fetch_add(1, Ordering::SeqCst);
                assert_eq!(prev, 0, "mutual exclusion violated");
                *g += 1;
                in_cs.fetch_sub(1, Ordering::SeqCst);
                drop(g);
                thread::yield_now();
            }
        }));
    }

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(lock.with_lock(|v| *v), threads * iters);
    assert_eq!(in_cs.load(Ordering::SeqCst), 0);
}

#[test]
fn lock_is_released_on_panic() {
    let m = SpinMutex::new(0u32);

    let res = panic::catch_unwind(panic::AssertUnwindSafe(|| {
        m.with_lock(|v| {
            *v = 123;
            panic!("boom");
        });
    }));
    assert!(res.is_err(), "expected panic");

    assert_eq!(m.with_lock(|v| *v), 123);
}

#[test]
fn signal_state_is_sticky_until_cleared() {
    let task = Task::new("sig");
    assert!(!task.signal_pending());
    task.raise_signal();
    assert!(task.signal_pending());
    assert!(task.signal_pending());
    task.clear_signal();
    assert!(!task.signal_pending());
    assert_eq!(task.name(), "sig");
}

#[test]
fn mutex_is_sync_for_send_t() {
    fn takes_sync<S: Sync>(_s: &S) {}
    let m = SpinMutex::new(AtomicBool::new(false));
    takes_sync(&m);
}
