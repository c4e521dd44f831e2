use std::{cmp::Ordering, fmt};

use anyhow::{bail, Context};
use enum_dispatch::enum_dispatch;
use log::{debug, info, warn};
use ringq_common::{Queue, QueueError};

use crate::{
    occupancy::{OccupancyState, OccupancyTracker},
    scenario::{QueueConfig, Scenario, Step},
};

/// Capacity-erased view of a `Queue<i64, N>`, going through the checked API only.
#[enum_dispatch]
pub trait ScenarioQueue {
    fn size(&self) -> usize;
    fn max_size(&self) -> usize;
    fn push_value(&mut self, value: i64) -> Result<(), QueueError<i64>>;
    fn emplace_value(&mut self, value: i64) -> Result<i64, QueueError<i64>>;
    fn pop_value(&mut self) -> Result<i64, QueueError<i64>>;
    fn front_value(&self) -> Option<i64>;
    fn back_value(&self) -> Option<i64>;
    fn clear_all(&mut self);
    fn items(&self) -> Vec<i64>;
}

impl<const N: usize> ScenarioQueue for Queue<i64, N> {
    fn size(&self) -> usize {
        self.len()
    }

    fn max_size(&self) -> usize {
        self.capacity()
    }

    fn push_value(&mut self, value: i64) -> Result<(), QueueError<i64>> {
        self.try_push(value)
    }

    fn emplace_value(&mut self, value: i64) -> Result<i64, QueueError<i64>> {
        self.try_emplace(value).map(|stored| *stored)
    }

    fn pop_value(&mut self) -> Result<i64, QueueError<i64>> {
        self.try_pop()
    }

    fn front_value(&self) -> Option<i64> {
        self.try_front().copied()
    }

    fn back_value(&self) -> Option<i64> {
        self.try_back().copied()
    }

    fn clear_all(&mut self) {
        self.clear();
    }

    fn items(&self) -> Vec<i64> {
        (0..self.len()).filter_map(|i| self.get(i).copied()).collect()
    }
}

fn filled<const N: usize>(init: &[i64]) -> Result<Queue<i64, N>, anyhow::Error> {
    if init.len() > N {
        bail!(
            "{} initial elements exceed capacity {}",
            init.len(),
            N
        );
    }
    let mut queue = Queue::new();
    for &value in init {
        queue.try_push(value)?;
    }
    Ok(queue)
}

#[enum_dispatch(ScenarioQueue)]
pub enum AnyQueue {
    Cap0(Queue<i64, 0>),
    Cap1(Queue<i64, 1>),
    Cap2(Queue<i64, 2>),
    Cap3(Queue<i64, 3>),
    Cap4(Queue<i64, 4>),
    Cap5(Queue<i64, 5>),
    Cap6(Queue<i64, 6>),
    Cap7(Queue<i64, 7>),
    Cap8(Queue<i64, 8>),
    Cap16(Queue<i64, 16>),
    Cap32(Queue<i64, 32>),
    Cap64(Queue<i64, 64>),
    Cap128(Queue<i64, 128>),
    Cap256(Queue<i64, 256>),
    Cap1024(Queue<i64, 1024>),
}

// Pairwise operations need both sides at the same capacity, one match arm per variant.
macro_rules! any_queue_ops {
    ($($variant:ident => $capacity:literal),+ $(,)?) => {
        impl AnyQueue {
            pub const CAPACITIES: &'static [usize] = &[$($capacity),+];

            pub fn with_capacity(capacity: usize, init: &[i64]) -> Result<Self, anyhow::Error> {
                match capacity {
                    $($capacity => Ok(AnyQueue::$variant(filled(init)?)),)+
                    _ => bail!(
                        "unsupported capacity {}, expected one of {:?}",
                        capacity,
                        Self::CAPACITIES
                    ),
                }
            }

            pub fn swap_with(&mut self, other: &mut AnyQueue) -> Result<(), anyhow::Error> {
                match (self, other) {
                    $((AnyQueue::$variant(a), AnyQueue::$variant(b)) => a.swap(b),)+
                    (a, b) => bail!(
                        "cannot swap a queue of capacity {} with one of capacity {}",
                        a.max_size(),
                        b.max_size()
                    ),
                }
                Ok(())
            }

            pub fn copy_into(&self, other: &mut AnyQueue) -> Result<(), anyhow::Error> {
                match (self, other) {
                    $((AnyQueue::$variant(a), AnyQueue::$variant(b)) => b.clone_from(a),)+
                    (a, b) => bail!(
                        "cannot copy a queue of capacity {} into one of capacity {}",
                        a.max_size(),
                        b.max_size()
                    ),
                }
                Ok(())
            }

            pub fn move_into(&mut self, other: &mut AnyQueue) -> Result<(), anyhow::Error> {
                match (self, other) {
                    $((AnyQueue::$variant(a), AnyQueue::$variant(b)) => *b = a.take(),)+
                    (a, b) => bail!(
                        "cannot move a queue of capacity {} into one of capacity {}",
                        a.max_size(),
                        b.max_size()
                    ),
                }
                Ok(())
            }

            pub fn compare(&self, other: &AnyQueue) -> Result<Ordering, anyhow::Error> {
                let ordering = match (self, other) {
                    $((AnyQueue::$variant(a), AnyQueue::$variant(b)) => a.cmp(b),)+
                    (a, b) => bail!(
                        "cannot compare a queue of capacity {} with one of capacity {}",
                        a.max_size(),
                        b.max_size()
                    ),
                };
                Ok(ordering)
            }
        }
    };
}

any_queue_ops! {
    Cap0 => 0,
    Cap1 => 1,
    Cap2 => 2,
    Cap3 => 3,
    Cap4 => 4,
    Cap5 => 5,
    Cap6 => 6,
    Cap7 => 7,
    Cap8 => 8,
    Cap16 => 16,
    Cap32 => 32,
    Cap64 => 64,
    Cap128 => 128,
    Cap256 => 256,
    Cap1024 => 1024,
}

struct NamedQueue {
    name: String,
    queue: AnyQueue,
    occupancy: OccupancyTracker,
}

impl NamedQueue {
    fn new(cfg: &QueueConfig) -> Result<Self, anyhow::Error> {
        let queue = AnyQueue::with_capacity(cfg.capacity, &cfg.init)
            .with_context(|| format!("cannot build queue {}", cfg.name))?;
        let mut occupancy = OccupancyTracker::new(&cfg.name, cfg.capacity);
        occupancy.observe(queue.size());
        Ok(NamedQueue {
            name: cfg.name.clone(),
            queue,
            occupancy,
        })
    }
}

enum Outcome {
    Applied(String),
    Violated(String),
}

pub struct Runner {
    strict: bool,
    queues: Vec<NamedQueue>,
    steps: usize,
    failures: usize,
}

impl Runner {
    pub fn new(scenario: &Scenario, strict: bool) -> Result<Self, anyhow::Error> {
        let mut queues: Vec<NamedQueue> = Vec::with_capacity(scenario.queues.len());
        for cfg in &scenario.queues {
            if queues.iter().any(|q| q.name == cfg.name) {
                bail!("queue {} is declared twice", cfg.name);
            }
            queues.push(NamedQueue::new(cfg)?);
        }
        info!("{} queue(s) ready", queues.len());

        Ok(Runner {
            strict,
            queues,
            steps: 0,
            failures: 0,
        })
    }

    pub fn run(&mut self, steps: &[Step]) -> Result<Report, anyhow::Error> {
        for (i, step) in steps.iter().enumerate() {
            debug!("step {}: {:?}", i, step);

            let outcome = self
                .execute(step)
                .with_context(|| format!("step {} ({}) is invalid", i, step.op()))?;
            self.steps += 1;

            match outcome {
                Outcome::Applied(msg) => info!("step {}: {}", i, msg),
                Outcome::Violated(msg) => {
                    self.failures += 1;
                    if self.strict {
                        bail!("step {} ({}) failed: {}", i, step.op(), msg);
                    }
                    warn!("step {} failed: {}", i, msg);
                }
            }

            for q in self.queues.iter_mut() {
                if !q.occupancy.observe(q.queue.size()) {
                    self.failures += 1;
                    if self.strict {
                        bail!(
                            "step {}: queue {} went through an impossible occupancy change",
                            i,
                            q.name
                        );
                    }
                }
            }
        }

        Ok(self.report())
    }

    pub fn report(&self) -> Report {
        Report {
            steps: self.steps,
            failures: self.failures,
            queues: self
                .queues
                .iter()
                .map(|q| QueueSummary {
                    name: q.name.clone(),
                    len: q.queue.size(),
                    capacity: q.queue.max_size(),
                    occupancy: *q.occupancy.state(),
                    items: q.queue.items(),
                })
                .collect(),
        }
    }

    fn execute(&mut self, step: &Step) -> Result<Outcome, anyhow::Error> {
        let outcome = match step {
            Step::Push { queue, value } => match self.get_mut(queue)?.push_value(*value) {
                Ok(()) => Outcome::Applied(format!("{} <- {}", queue, value)),
                Err(e) => Outcome::Violated(format!("push {} onto {}: {}", value, queue, e)),
            },
            Step::Emplace { queue, value } => match self.get_mut(queue)?.emplace_value(*value) {
                Ok(stored) => Outcome::Applied(format!("{} <- {} (emplaced)", queue, stored)),
                Err(e) => Outcome::Violated(format!("emplace {} onto {}: {}", value, queue, e)),
            },
            Step::Pop { queue } => match self.get_mut(queue)?.pop_value() {
                Ok(value) => Outcome::Applied(format!("{} -> {}", queue, value)),
                Err(e) => Outcome::Violated(format!("pop from {}: {}", queue, e)),
            },
            Step::Front { queue } => match self.get(queue)?.front_value() {
                Some(value) => Outcome::Applied(format!("front of {} is {}", queue, value)),
                None => Outcome::Violated(format!(
                    "front of {}: {}",
                    queue,
                    QueueError::<i64>::Empty
                )),
            },
            Step::Back { queue } => match self.get(queue)?.back_value() {
                Some(value) => Outcome::Applied(format!("back of {} is {}", queue, value)),
                None => Outcome::Violated(format!(
                    "back of {}: {}",
                    queue,
                    QueueError::<i64>::Empty
                )),
            },
            Step::Clear { queue } => {
                self.get_mut(queue)?.clear_all();
                Outcome::Applied(format!("{} cleared", queue))
            }
            Step::Swap { queue, other } => {
                let (a, b) = self.pair_mut(queue, other)?;
                a.swap_with(b)?;
                Outcome::Applied(format!("{} <-> {}", queue, other))
            }
            Step::Copy { queue, other } => {
                let (a, b) = self.pair_mut(queue, other)?;
                a.copy_into(b)?;
                Outcome::Applied(format!("{} = copy of {}", other, queue))
            }
            Step::Move { queue, other } => {
                let (a, b) = self.pair_mut(queue, other)?;
                a.move_into(b)?;
                Outcome::Applied(format!("{} = {}, {} left empty", other, queue, queue))
            }
            Step::Compare { queue, other } => {
                let (a, b) = self.pair_mut(queue, other)?;
                let symbol = match a.compare(b)? {
                    Ordering::Less => "<",
                    Ordering::Equal => "==",
                    Ordering::Greater => ">",
                };
                Outcome::Applied(format!("{} {} {}", queue, symbol, other))
            }
            Step::Expect { queue, items } => {
                let actual = self.get(queue)?.items();
                if &actual == items {
                    Outcome::Applied(format!("{} holds {:?}", queue, actual))
                } else {
                    Outcome::Violated(format!(
                        "{} holds {:?}, expected {:?}",
                        queue, actual, items
                    ))
                }
            }
        };

        Ok(outcome)
    }

    fn position(&self, name: &str) -> Result<usize, anyhow::Error> {
        match self.queues.iter().position(|q| q.name == name) {
            Some(i) => Ok(i),
            None => bail!("unknown queue {}", name),
        }
    }

    fn get(&self, name: &str) -> Result<&AnyQueue, anyhow::Error> {
        let i = self.position(name)?;
        Ok(&self.queues[i].queue)
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut AnyQueue, anyhow::Error> {
        let i = self.position(name)?;
        Ok(&mut self.queues[i].queue)
    }

    fn pair_mut(
        &mut self,
        first: &str,
        second: &str,
    ) -> Result<(&mut AnyQueue, &mut AnyQueue), anyhow::Error> {
        let i = self.position(first)?;
        let j = self.position(second)?;
        if i == j {
            bail!("queue {} cannot be paired with itself", first);
        }

        let (a, b) = if i < j {
            let (left, right) = self.queues.split_at_mut(j);
            (&mut left[i], &mut right[0])
        } else {
            let (left, right) = self.queues.split_at_mut(i);
            (&mut right[0], &mut left[j])
        };
        Ok((&mut a.queue, &mut b.queue))
    }
}

#[derive(Debug)]
pub struct QueueSummary {
    pub name: String,
    pub len: usize,
    pub capacity: usize,
    pub occupancy: OccupancyState,
    pub items: Vec<i64>,
}

#[derive(Debug)]
pub struct Report {
    pub steps: usize,
    pub failures: usize,
    pub queues: Vec<QueueSummary>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for q in &self.queues {
            writeln!(
                f,
                "{} [{}/{}] {:?} {:?}",
                q.name, q.len, q.capacity, q.occupancy, q.items
            )?;
        }
        writeln!(f, "steps: {}, failures: {}", self.steps, self.failures)
    }
}

#[cfg(test)]
mod test {
    use super::{Report, Runner};
    use crate::{occupancy::OccupancyState, scenario::Scenario};

    fn run(yaml: &str, strict: bool) -> Result<Report, anyhow::Error> {
        let scenario = Scenario::from_yaml(yaml)?;
        let mut runner = Runner::new(&scenario, strict)?;
        runner.run(&scenario.steps)
    }

    #[test]
    fn test_wrap_around() {
        let report = run(
            r#"
queues:
  - { name: q, capacity: 3 }
steps:
  - { op: push, queue: q, value: 1 }
  - { op: push, queue: q, value: 2 }
  - { op: pop, queue: q }
  - { op: push, queue: q, value: 3 }
  - { op: emplace, queue: q, value: 4 }
  - { op: expect, queue: q, items: [2, 3, 4] }
  - { op: front, queue: q }
  - { op: back, queue: q }
"#,
            true,
        )
        .unwrap();

        assert_eq!(report.steps, 8);
        assert_eq!(report.failures, 0);
        assert_eq!(report.queues[0].items, vec![2, 3, 4]);
        assert_eq!(report.queues[0].occupancy, OccupancyState::Full);
    }

    #[test]
    fn test_violations_are_counted() {
        let yaml = r#"
queues:
  - { name: q, capacity: 1, init: [7] }
steps:
  - { op: push, queue: q, value: 8 }
  - { op: pop, queue: q }
  - { op: pop, queue: q }
  - { op: front, queue: q }
  - { op: back, queue: q }
  - { op: expect, queue: q, items: [7] }
"#;

        let report = run(yaml, false).unwrap();
        assert_eq!(report.steps, 6);
        assert_eq!(report.failures, 5);
        assert_eq!(report.queues[0].occupancy, OccupancyState::Empty);

        assert!(run(yaml, true).is_err());
    }

    #[test]
    fn test_copy_move_and_compare() {
        let report = run(
            r#"
queues:
  - { name: a, capacity: 4, init: [1, 2] }
  - { name: b, capacity: 4 }
  - { name: c, capacity: 4 }
steps:
  - { op: copy, queue: a, other: b }
  - { op: push, queue: b, value: 3 }
  - { op: expect, queue: a, items: [1, 2] }
  - { op: compare, queue: a, other: b }
  - { op: move, queue: b, other: c }
  - { op: expect, queue: b, items: [] }
  - { op: expect, queue: c, items: [1, 2, 3] }
  - { op: swap, queue: a, other: c }
  - { op: swap, queue: a, other: c }
  - { op: expect, queue: a, items: [1, 2] }
  - { op: clear, queue: c }
  - { op: expect, queue: c, items: [] }
"#,
            true,
        )
        .unwrap();

        assert_eq!(report.failures, 0);
        assert_eq!(report.queues[1].occupancy, OccupancyState::Empty);
    }

    #[test]
    fn test_scenario_errors() {
        let mismatch = r#"
queues:
  - { name: a, capacity: 2 }
  - { name: b, capacity: 3 }
steps:
  - { op: swap, queue: a, other: b }
"#;
        assert!(run(mismatch, false).is_err());

        let unknown = r#"
queues:
  - { name: a, capacity: 2 }
steps:
  - { op: pop, queue: z }
"#;
        assert!(run(unknown, false).is_err());

        let self_pair = r#"
queues:
  - { name: a, capacity: 2 }
steps:
  - { op: compare, queue: a, other: a }
"#;
        assert!(run(self_pair, false).is_err());

        assert!(run("queues: [{ name: a, capacity: 9 }]", false).is_err());
        assert!(run("queues: [{ name: a, capacity: 2, init: [1, 2, 3] }]", false).is_err());
        assert!(run(
            "queues: [{ name: a, capacity: 2 }, { name: a, capacity: 2 }]",
            false
        )
        .is_err());
    }

    #[test]
    fn test_impossible_occupancy_change_is_a_failure() {
        use crate::occupancy::OccupancyTracker;

        let scenario = Scenario::from_yaml(
            r#"
queues:
  - { name: q, capacity: 3 }
steps:
  - { op: push, queue: q, value: 1 }
  - { op: push, queue: q, value: 2 }
"#,
        )
        .unwrap();

        // A tracker that believes the queue holds one element at most: the second push
        // grows a queue it already considers full.
        let mut runner = Runner::new(&scenario, false).unwrap();
        runner.queues[0].occupancy = OccupancyTracker::new("q", 1);
        let report = runner.run(&scenario.steps).unwrap();
        assert_eq!(report.steps, 2);
        assert_eq!(report.failures, 1);
        assert_eq!(report.queues[0].items, vec![1, 2]);

        let mut runner = Runner::new(&scenario, true).unwrap();
        runner.queues[0].occupancy = OccupancyTracker::new("q", 1);
        assert!(runner.run(&scenario.steps).is_err());
    }

    #[test]
    fn test_zero_capacity() {
        let report = run(
            r#"
queues:
  - { name: z, capacity: 0 }
steps:
  - { op: push, queue: z, value: 1 }
  - { op: expect, queue: z, items: [] }
"#,
            false,
        )
        .unwrap();

        assert_eq!(report.failures, 1);
        assert_eq!(report.queues[0].capacity, 0);
        assert_eq!(report.queues[0].occupancy, OccupancyState::Empty);
    }

    #[test]
    fn test_bundled_scenario() {
        let report = run(include_str!("../scenarios/wraparound.yaml"), true).unwrap();

        assert_eq!(report.failures, 0);
        assert!(report.to_string().ends_with("failures: 0\n"));
    }
}
