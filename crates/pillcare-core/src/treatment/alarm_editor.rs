//! Client-side mutations of a draft's alarm list.
//!
//! Nothing here touches the network; the save orchestrator reconciles the
//! list with the backend later.

use super::model::{AlarmDraft, TreatmentDraft};
use super::validation::{MAX_FREQUENCY, MIN_FREQUENCY};
use crate::error::{PillcareError, Result};

/// Hour of the first generated alarm.
pub const FIRST_DOSE_HOUR: u32 = 8;

const MEAL_LABELS: [&str; 5] = ["Breakfast", "Lunch", "Snack", "Dinner", "Bedtime"];

/// A single-field change to one alarm.
#[derive(Debug, Clone, PartialEq)]
pub enum AlarmFieldUpdate {
    Time(String),
    Description(String),
    IsActive(bool),
    SoundEnabled(bool),
    VisualEnabled(bool),
}

impl TreatmentDraft {
    /// Appends an alarm with all flags on.
    ///
    /// Rejected when `time` or `description` is blank; the list is left
    /// untouched in that case.
    pub fn add_alarm(&mut self, time: &str, description: &str) -> Result<&AlarmDraft> {
        let time = time.trim();
        let description = description.trim();
        if time.is_empty() {
            return Err(PillcareError::validation("alarm.time", "Alarm time is required"));
        }
        if description.is_empty() {
            return Err(PillcareError::validation(
                "alarm.description",
                "Alarm description is required",
            ));
        }

        self.alarms.push(AlarmDraft::new(time, description));
        let index = self.alarms.len() - 1;
        Ok(&self.alarms[index])
    }

    /// Removes the alarm at `index`, keeping the order of the rest.
    pub fn remove_alarm(&mut self, index: usize) -> Option<AlarmDraft> {
        (index < self.alarms.len()).then(|| self.alarms.remove(index))
    }

    /// Changes one field of the alarm at `index` in place.
    pub fn update_alarm_field(&mut self, index: usize, update: AlarmFieldUpdate) -> Result<()> {
        let alarm = self
            .alarms
            .get_mut(index)
            .ok_or_else(|| PillcareError::not_found("alarm", index))?;

        match update {
            AlarmFieldUpdate::Time(time) => alarm.time = time,
            AlarmFieldUpdate::Description(description) => alarm.description = description,
            AlarmFieldUpdate::IsActive(value) => alarm.is_active = value,
            AlarmFieldUpdate::SoundEnabled(value) => alarm.sound_enabled = value,
            AlarmFieldUpdate::VisualEnabled(value) => alarm.visual_enabled = value,
        }
        Ok(())
    }

    /// Replaces the whole alarm list with `frequency` evenly spaced alarms.
    ///
    /// See [`evenly_spaced_alarms`].
    pub fn generate_evenly_spaced(&mut self, frequency: i32) -> Result<()> {
        self.alarms = evenly_spaced_alarms(frequency)?;
        Ok(())
    }
}

/// Builds `frequency` alarms starting at 08:00, `24 / frequency` hours apart.
///
/// Labels follow the meal-time order (Breakfast, Lunch, Snack, Dinner,
/// Bedtime) and continue as "Dose N". Times wrap past midnight.
pub fn evenly_spaced_alarms(frequency: i32) -> Result<Vec<AlarmDraft>> {
    if !(MIN_FREQUENCY..=MAX_FREQUENCY).contains(&frequency) {
        return Err(PillcareError::validation(
            "frequency",
            format!("Frequency must be between {MIN_FREQUENCY} and {MAX_FREQUENCY} doses per day"),
        ));
    }

    let count = frequency as u32;
    let interval = 24 / count;
    let alarms = (0..count)
        .map(|i| {
            let hour = (FIRST_DOSE_HOUR + i * interval) % 24;
            let label = MEAL_LABELS
                .get(i as usize)
                .map(|label| (*label).to_string())
                .unwrap_or_else(|| format!("Dose {}", i + 1));
            AlarmDraft::new(format!("{hour:02}:00"), label)
        })
        .collect();

    Ok(alarms)
}
