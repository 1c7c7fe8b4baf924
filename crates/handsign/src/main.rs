use std::{
    io, thread,
    time::{Duration, Instant},
};

use handsign::config::Config;
use handsign::cycle::{DetectionCycle, LandmarkSource, Presenter, RawHand};
use handsign::estimator::{Estimator, GestureMatch};
use handsign::gesture::{asset_for_name, GestureName};
use handsign::landmark::Finger;
use handsign::pose::{Curl, Direction, PoseExtractor};
use handsign::registry::Registry;
use handsign::schedule::{Scheduler, SystemClock};
use handsign::synth::{FingerShape, SyntheticHand};
use pawawwewism::{promise, Promise, PromiseHandle, Worker};

const RUN_FOR: Duration = Duration::from_secs(10);

/// Number of acquisitions each demo pose is held for.
const FRAMES_PER_POSE: u32 = 12;

fn main() -> anyhow::Result<()> {
    handsign::init_logger!();

    let config = Config::from_env()?;
    let registry = Registry::builtin()?;
    let estimator = Estimator::with_extractor(&registry, PoseExtractor::new(*config.pose()));
    let source = SyntheticSource::spawn()?;

    let mut cycle =
        DetectionCycle::new(estimator, source, LogPresenter).min_confidence(config.threshold());
    let mut scheduler = Scheduler::new(SystemClock::new(), config.period());

    let start = Instant::now();
    let stats = cycle.run(&mut scheduler, |_| start.elapsed() >= RUN_FOR);
    log::info!(
        "{} acquisitions, {} completed, {} ticks dropped, {} hands rejected",
        stats.acquisitions,
        stats.completed,
        stats.dropped,
        stats.rejected,
    );

    Ok(())
}

fn demo_poses() -> Vec<(&'static str, Option<SyntheticHand>)> {
    let extended = |dir| FingerShape::curled(Curl::NoCurl, dir);
    let fist = SyntheticHand::uniform(FingerShape::curled(Curl::FullCurl, Direction::Up));
    vec![
        ("open hand", Some(SyntheticHand::uniform(extended(Direction::Up)))),
        ("nothing", None),
        ("fist", Some(fist)),
        (
            "victory",
            Some(
                fist.with(Finger::Thumb, FingerShape::curled(Curl::HalfCurl, Direction::Up))
                    .with(Finger::Index, extended(Direction::Up))
                    .with(Finger::Middle, extended(Direction::Up)),
            ),
        ),
        ("thumb up", Some(fist.with(Finger::Thumb, extended(Direction::Up)))),
        ("pointing left", Some(fist.with(Finger::Index, extended(Direction::Left)))),
        (
            "love you",
            Some(
                fist.with(Finger::Thumb, extended(Direction::UpLeft))
                    .with(Finger::Index, extended(Direction::Up))
                    .with(Finger::Pinky, extended(Direction::Up)),
            ),
        ),
        // Index and middle finger slightly tilted: in between two gestures.
        (
            "sloppy victory",
            Some(
                fist.with(Finger::Index, FingerShape::bent(18.0, Direction::UpRight))
                    .with(Finger::Middle, extended(Direction::Up)),
            ),
        ),
    ]
}

struct Request {
    hand: Option<SyntheticHand>,
    latency: Duration,
    promise: Promise<Vec<RawHand>>,
}

/// Stands in for a hand landmark network running on a background thread.
struct SyntheticSource {
    worker: Worker<Request>,
    poses: Vec<(&'static str, Option<SyntheticHand>)>,
    frame: u32,
}

impl SyntheticSource {
    fn spawn() -> io::Result<Self> {
        let worker = Worker::builder().name("landmarks").spawn(
            |Request {
                 hand,
                 latency,
                 promise,
             }| {
                thread::sleep(latency);
                let hands: Vec<RawHand> = hand
                    .into_iter()
                    .map(|hand| hand.landmarks().points().iter().map(|p| p.position()).collect())
                    .collect();
                promise.fulfill(hands);
            },
        )?;

        Ok(Self {
            worker,
            poses: demo_poses(),
            frame: 0,
        })
    }
}

impl LandmarkSource for SyntheticSource {
    fn acquire(&mut self) -> Option<PromiseHandle<Vec<RawHand>>> {
        let index = (self.frame / FRAMES_PER_POSE) as usize % self.poses.len();
        let (label, hand) = self.poses[index];
        if self.frame % FRAMES_PER_POSE == 0 {
            log::info!("showing: {label}");
        }

        // Every 5th inference takes longer than a tick.
        let latency = if self.frame % 5 == 4 {
            Duration::from_millis(180)
        } else {
            Duration::from_millis(30)
        };
        self.frame += 1;

        let (promise, handle) = promise();
        self.worker.send(Request {
            hand,
            latency,
            promise,
        });
        Some(handle)
    }
}

struct LogPresenter;

impl Presenter for LogPresenter {
    fn show_gesture(&mut self, gesture: Option<&GestureMatch>) {
        match gesture {
            Some(m) => {
                let emoji = m
                    .name
                    .parse::<GestureName>()
                    .map_or("", |name| name.emoji());
                log::info!(
                    "{emoji} {} ({:.2}) -> {}",
                    m.name,
                    m.score,
                    asset_for_name(&m.name)
                );
            }
            None => log::info!("no gesture"),
        }
    }
}
