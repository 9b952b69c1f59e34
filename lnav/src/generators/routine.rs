//! Rule-based routine generator

use tracing::debug;

use crate::domain::{ClockTime, Profile, Routine, RoutineBlock};

const HYGIENE_END: ClockTime = ClockTime::at(7, 30);
const BREAKFAST_END: ClockTime = ClockTime::at(8, 0);
const GYM_START: ClockTime = ClockTime::at(18, 0);
const GYM_END: ClockTime = ClockTime::at(19, 0);
const LEARNING_START: ClockTime = ClockTime::at(19, 30);
const LEARNING_END: ClockTime = ClockTime::at(20, 30);
const WIND_DOWN_START: ClockTime = ClockTime::at(22, 30);
const EVENING_START: ClockTime = ClockTime::at(18, 0);

/// Build the day from the profile's times and feature toggles
pub fn generate_routine(profile: &Profile) -> Routine {
    debug!(
        wants_gym = profile.wants_gym,
        wants_learning = profile.wants_learning,
        wants_skincare = profile.wants_skincare,
        "generate_routine: called"
    );
    let mut routine = Routine::default();

    routine.push(RoutineBlock::new(profile.wake_time, HYGIENE_END, "Morning hygiene & skincare"));
    routine.push(RoutineBlock::new(HYGIENE_END, BREAKFAST_END, "Breakfast"));
    routine.push(RoutineBlock::new(profile.work_start, profile.work_end, "Work / Study"));

    if profile.wants_gym {
        routine.push(RoutineBlock::new(GYM_START, GYM_END, "Gym / Workout"));
    }

    if profile.wants_learning {
        routine.push(RoutineBlock::new(LEARNING_START, LEARNING_END, "Learning / Upskilling"));
    }

    let closing = if profile.wants_skincare {
        "Night skincare & wind down"
    } else {
        "Wind down / Relax"
    };
    routine.push(RoutineBlock::new(WIND_DOWN_START, profile.sleep_time, closing));

    routine
}

/// Three-block substitute used when the generated routine fails validation
pub fn fallback_routine(profile: &Profile) -> Routine {
    debug!("fallback_routine: called");
    Routine::new(vec![
        RoutineBlock::new(profile.wake_time, profile.work_start, "Morning routine"),
        RoutineBlock::new(profile.work_start, profile.work_end, "Work / Study"),
        RoutineBlock::new(EVENING_START, profile.sleep_time, "Evening routine"),
    ])
}
