//! Status channel ordering and delivery across threads.

use benchcheck_core::{status_channel, StatusBoard, StatusSubscriber, Track, ValidationStatus};

#[derive(Default)]
struct Recorder {
    scene: Vec<(String, bool)>,
    image: Vec<(String, bool)>,
}

impl StatusSubscriber for Recorder {
    fn on_scene_status(&mut self, label: &str, ok: bool) {
        self.scene.push((label.to_string(), ok));
    }

    fn on_image_status(&mut self, label: &str, ok: bool) {
        self.image.push((label.to_string(), ok));
    }
}

#[test]
fn per_track_order_survives_concurrent_producers() {
    let (tx, mut rx) = status_channel();

    let workers: Vec<_> = [Track::Scene, Track::Image]
        .into_iter()
        .map(|track| {
            let reporter = tx.reporter(track);
            std::thread::spawn(move || {
                for i in 0..500 {
                    reporter.progress(format!("{i}"));
                }
                reporter.finish("done", true);
            })
        })
        .collect();
    drop(tx);
    for worker in workers {
        worker.join().unwrap();
    }

    let mut recorder = Recorder::default();
    assert_eq!(rx.drain_into(&mut recorder), 1002);

    for events in [&recorder.scene, &recorder.image] {
        assert_eq!(events.len(), 501);
        for (i, (label, ok)) in events[..500].iter().enumerate() {
            assert_eq!(label, &i.to_string());
            assert!(!ok);
        }
        assert_eq!(events[500], ("done".to_string(), true));
    }
}

#[tokio::test]
async fn async_consumer_sees_events_then_end_of_stream() {
    let (tx, mut rx) = status_channel();

    let producer = std::thread::spawn(move || {
        let image = tx.reporter(Track::Image);
        image.progress("Starting...");
        image.progress("Comparing...");
        image.finish("OK (0 different pixels, 0.00%)", true);
    });

    let mut received = Vec::new();
    while let Some(status) = rx.next().await {
        received.push(status);
    }
    producer.join().unwrap();

    assert_eq!(
        received,
        vec![
            ValidationStatus::progress(Track::Image, "Starting..."),
            ValidationStatus::progress(Track::Image, "Comparing..."),
            ValidationStatus::new(Track::Image, "OK (0 different pixels, 0.00%)", true),
        ]
    );
}

#[test]
fn board_reflects_latest_failure() {
    let (tx, mut rx) = status_channel();
    tx.reporter(Track::Scene).progress("Starting...");
    tx.reporter(Track::Scene).finish("Failed", false);
    tx.reporter(Track::Image).finish("OK (1 different pixels, 0.01%)", true);

    let mut board = StatusBoard::new();
    rx.drain_into(&mut board);

    assert_eq!(board.get(Track::Scene).unwrap().label, "Failed");
    assert!(!board.get(Track::Scene).unwrap().ok);
    assert!(board.get(Track::Image).unwrap().ok);
    assert!(!board.all_ok());
}
