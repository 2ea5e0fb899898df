//! Piecewise-constant schedules.

use crate::error::{PlantError, PlantResult};
use pf_core::ScheduleId;
use serde::{Deserialize, Serialize};

/// Hourly values, repeating over their own length.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Schedule {
    pub name: String,
    pub values: Vec<f64>,
}

impl Schedule {
    pub fn constant(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            values: vec![value],
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ScheduleBank {
    schedules: Vec<Schedule>,
}

impl ScheduleBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, schedule: Schedule) -> PlantResult<ScheduleId> {
        if schedule.values.is_empty() {
            return Err(PlantError::InvalidArg {
                what: "schedule must carry at least one value",
            });
        }
        let id = ScheduleId::from_index(self.schedules.len() as u32);
        self.schedules.push(schedule);
        Ok(id)
    }

    /// Current value at the given hour index; pure.
    pub fn current_value(&self, id: ScheduleId, hour_index: usize) -> f64 {
        let sched = &self.schedules[id.index() as usize];
        sched.values[hour_index % sched.values.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_over_length() {
        let mut bank = ScheduleBank::new();
        let id = bank
            .add(Schedule {
                name: "day".into(),
                values: vec![0.0, 1.0, 1.0],
            })
            .unwrap();
        assert_eq!(bank.current_value(id, 0), 0.0);
        assert_eq!(bank.current_value(id, 1), 1.0);
        assert_eq!(bank.current_value(id, 3), 0.0);
        assert_eq!(bank.current_value(id, 100), 1.0);
    }

    #[test]
    fn rejects_empty() {
        let mut bank = ScheduleBank::new();
        assert!(bank
            .add(Schedule {
                name: "empty".into(),
                values: vec![],
            })
            .is_err());
    }
}
