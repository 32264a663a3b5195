use std::thread;

use tokio::time::{sleep, timeout, Duration};
use turnlink::{MoveHandoff, SessionError};

#[tokio::test]
async fn take_before_deposit_waits_for_value() {
    let handoff = MoveHandoff::new();
    let producer = handoff.clone();

    let waiter = tokio::spawn(async move { handoff.take().await });
    sleep(Duration::from_millis(50)).await;
    assert!(!waiter.is_finished(), "take returned before any deposit");

    assert_eq!(producer.deposit("A1".to_string()), Ok(None));
    let mv = waiter.await.unwrap().unwrap();
    assert_eq!(mv, "A1");
    assert!(!producer.is_pending());
}

#[tokio::test]
async fn deposit_before_take_is_not_lost() {
    let handoff = MoveHandoff::new();
    handoff.deposit("B2".to_string()).unwrap();
    assert!(handoff.is_pending());

    let mv = timeout(Duration::from_millis(100), handoff.take())
        .await
        .expect("pending value should be taken without waiting")
        .unwrap();
    assert_eq!(mv, "B2");
    assert!(!handoff.is_pending());
}

#[tokio::test]
async fn deposit_from_plain_thread_wakes_task() {
    let handoff = MoveHandoff::new();
    let producer = handoff.clone();

    let worker = thread::spawn(move || {
        thread::sleep(std::time::Duration::from_millis(30));
        producer.deposit(7u32).unwrap();
    });

    let value = timeout(Duration::from_secs(2), handoff.take())
        .await
        .expect("deposit from another thread must wake the consumer")
        .unwrap();
    assert_eq!(value, 7);
    worker.join().unwrap();
}

#[tokio::test]
async fn newest_deposit_replaces_pending_one() {
    let handoff = MoveHandoff::new();
    assert_eq!(handoff.deposit("A1"), Ok(None));
    assert_eq!(handoff.deposit("C3"), Ok(Some("A1")));
    assert_eq!(handoff.take().await.unwrap(), "C3");
}

#[tokio::test]
async fn slot_is_empty_after_take() {
    let handoff = MoveHandoff::new();
    handoff.deposit(1u8).unwrap();
    assert_eq!(handoff.take().await.unwrap(), 1);

    // A stale wake-up permit must not produce a phantom value.
    let second = timeout(Duration::from_millis(50), handoff.take()).await;
    assert!(second.is_err(), "second take should still be waiting");
}

#[tokio::test]
async fn interrupt_wakes_waiting_take() {
    let handoff: MoveHandoff<String> = MoveHandoff::new();
    let control = handoff.clone();

    let waiter = tokio::spawn(async move { handoff.take().await });
    sleep(Duration::from_millis(20)).await;
    control.interrupt();

    let result = waiter.await.unwrap();
    assert_eq!(result, Err(SessionError::InterruptedWait));
}

#[tokio::test]
async fn pending_value_outlives_interrupt() {
    let handoff = MoveHandoff::new();
    handoff.deposit("A1".to_string()).unwrap();
    handoff.interrupt();
    assert!(handoff.is_interrupted());

    assert_eq!(handoff.take().await.unwrap(), "A1");
    assert_eq!(handoff.take().await, Err(SessionError::InterruptedWait));

    // Deposits after the interrupt are handed back.
    assert_eq!(handoff.deposit("B2".to_string()), Err("B2".to_string()));
    assert!(!handoff.is_pending());
}

#[tokio::test]
async fn hand_off_is_reusable_across_turns() {
    let handoff = MoveHandoff::new();
    for turn in 0..5u32 {
        let producer = handoff.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(5)).await;
            producer.deposit(turn).unwrap();
        });
        assert_eq!(handoff.take().await.unwrap(), turn);
    }
}

#[tokio::test]
async fn deposit_wait_holds_back_until_slot_drains() {
    let handoff = MoveHandoff::new();
    let producer = handoff.clone();

    let feeder = thread::spawn(move || {
        for mv in ["A1", "B2", "C3"] {
            producer.deposit_wait(mv.to_string()).unwrap();
        }
    });

    let mut taken = Vec::new();
    for _ in 0..3 {
        let mv = timeout(Duration::from_secs(2), handoff.take())
            .await
            .expect("queued move should arrive")
            .unwrap();
        taken.push(mv);
    }
    feeder.join().unwrap();
    assert_eq!(taken, vec!["A1", "B2", "C3"]);
    assert!(!handoff.is_pending());
}

#[tokio::test]
async fn deposit_wait_returns_value_on_interrupt() {
    let handoff = MoveHandoff::new();
    handoff.deposit("A1".to_string()).unwrap();
    let producer = handoff.clone();

    let feeder = thread::spawn(move || producer.deposit_wait("B2".to_string()));
    sleep(Duration::from_millis(30)).await;
    assert!(!feeder.is_finished(), "deposit_wait overwrote a pending value");

    handoff.interrupt();
    assert_eq!(feeder.join().unwrap(), Err("B2".to_string()));
    assert_eq!(handoff.take().await.unwrap(), "A1");
}
