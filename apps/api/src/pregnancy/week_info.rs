use serde::Serialize;

/// Gestational weeks considered meaningful for the lookup endpoint.
pub const MIN_WEEK: u32 = 1;
pub const MAX_WEEK: u32 = 42;

/// Development milestone shown for a gestational week. Each entry covers the
/// span from its `week` up to the next entry.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WeekMilestone {
    pub week: u32,
    pub baby_size: &'static str,
    pub baby_weight: &'static str,
    pub developments: &'static [&'static str],
}

const MILESTONES: &[WeekMilestone] = &[
    WeekMilestone {
        week: 1,
        baby_size: "Poppy seed",
        baby_weight: "<1 g",
        developments: &[
            "Fertilization and implantation take place",
            "The neural tube begins to form",
        ],
    },
    WeekMilestone {
        week: 8,
        baby_size: "Raspberry",
        baby_weight: "1 g",
        developments: &[
            "All major organs have started forming",
            "Tiny limb buds become arms and legs",
            "The heart beats at around 150-170 bpm",
        ],
    },
    WeekMilestone {
        week: 12,
        baby_size: "Lime",
        baby_weight: "45 g",
        developments: &[
            "Reflexes are developing",
            "Fingers and toes are fully separated",
            "Sucking motions begin",
        ],
    },
    WeekMilestone {
        week: 16,
        baby_size: "Avocado",
        baby_weight: "100 g",
        developments: &[
            "The skeleton hardens from cartilage to bone",
            "Facial muscles allow first expressions",
        ],
    },
    WeekMilestone {
        week: 20,
        baby_size: "Banana",
        baby_weight: "300 g",
        developments: &[
            "Movements become strong enough to feel",
            "The anatomy scan can determine sex",
            "Hair and nails are growing",
        ],
    },
    WeekMilestone {
        week: 24,
        baby_size: "Ear of corn",
        baby_weight: "600 g",
        developments: &[
            "Lungs develop branches and surfactant cells",
            "Hearing is well established",
        ],
    },
    WeekMilestone {
        week: 28,
        baby_size: "Eggplant",
        baby_weight: "1 kg",
        developments: &[
            "Eyes open and can perceive light",
            "Regular sleep and wake cycles emerge",
        ],
    },
    WeekMilestone {
        week: 32,
        baby_size: "Butternut squash",
        baby_weight: "1.7 kg",
        developments: &[
            "Bones fully formed though still soft",
            "Most babies settle head-down",
        ],
    },
    WeekMilestone {
        week: 36,
        baby_size: "Romaine lettuce",
        baby_weight: "2.6 kg",
        developments: &[
            "The lungs are nearly mature",
            "Fat accumulates to regulate temperature",
        ],
    },
    WeekMilestone {
        week: 40,
        baby_size: "Small pumpkin",
        baby_weight: "3.4 kg",
        developments: &[
            "Full term: organs are ready for life outside",
            "Labor can start any day",
        ],
    },
];

/// Returns the milestone covering `week`, or `None` outside 1..=42.
pub fn lookup(week: u32) -> Option<&'static WeekMilestone> {
    if !(MIN_WEEK..=MAX_WEEK).contains(&week) {
        return None;
    }
    MILESTONES.iter().rev().find(|m| m.week <= week)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_zero_is_none() {
        assert!(lookup(0).is_none());
    }

    #[test]
    fn test_week_43_is_none() {
        assert!(lookup(43).is_none());
    }

    #[test]
    fn test_week_12_is_lime() {
        let m = lookup(12).unwrap();
        assert_eq!(m.baby_size, "Lime");
        assert_eq!(m.week, 12);
    }

    #[test]
    fn test_weeks_between_milestones_use_floor_entry() {
        // Weeks 12-15 all fall under the week-12 milestone.
        for w in 12..16 {
            assert_eq!(lookup(w).unwrap().week, 12);
        }
        assert_eq!(lookup(16).unwrap().week, 16);
    }

    #[test]
    fn test_week_42_uses_week_40_entry() {
        assert_eq!(lookup(42).unwrap().week, 40);
    }

    #[test]
    fn test_every_valid_week_has_info() {
        for w in MIN_WEEK..=MAX_WEEK {
            let m = lookup(w).expect("missing milestone");
            assert!(!m.developments.is_empty());
        }
    }
}
