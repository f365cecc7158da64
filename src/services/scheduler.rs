//! # 세션 스케줄러
//!
//! 주당 훈련 횟수와 분할 방식을 실제 요일과 세션 종류로 바꿉니다.
//!
//! | 주당 횟수 | 요일 |
//! |-----------|------|
//! | 2 | 월, 목 |
//! | 3 | 월, 수, 금 |
//! | 4 | 월, 화, 목, 금 |
//! | 5 | 월, 화, 수, 금, 토 |

use chrono::{Days, NaiveDate};
use std::fmt;

use crate::models::SplitType;

/// 하루 세션의 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionType {
    FullBodyA,
    FullBodyB,
    Upper,
    Lower,
    Push,
    Pull,
    Legs,
}

impl SessionType {
    pub fn name(self) -> &'static str {
        match self {
            Self::FullBodyA => "Full Body A",
            Self::FullBodyB => "Full Body B",
            Self::Upper => "Upper",
            Self::Lower => "Lower",
            Self::Push => "Push",
            Self::Pull => "Pull",
            Self::Legs => "Legs",
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 주당 횟수별 훈련 요일 (1=월 … 7=일). 알 수 없는 횟수는 주 3회 표를 씁니다.
pub fn session_days_for_frequency(frequency: u32) -> &'static [u32] {
    match frequency {
        2 => &[1, 4],
        3 => &[1, 3, 5],
        4 => &[1, 2, 4, 5],
        5 => &[1, 2, 3, 5, 6],
        _ => &[1, 3, 5],
    }
}

/// 그 주의 `day_index`번째(0부터) 세션 종류
pub fn session_type(split: SplitType, day_index: usize) -> SessionType {
    match split {
        SplitType::FullBody => {
            if day_index % 2 == 0 {
                SessionType::FullBodyA
            } else {
                SessionType::FullBodyB
            }
        }
        SplitType::UpperLower => {
            if day_index % 2 == 0 {
                SessionType::Upper
            } else {
                SessionType::Lower
            }
        }
        SplitType::PushPullLegs => match day_index % 3 {
            0 => SessionType::Push,
            1 => SessionType::Pull,
            _ => SessionType::Legs,
        },
    }
}

/// 세션 날짜 = 시작일 + (week-1)*7 + (day_of_week-1)
pub fn session_date(start: NaiveDate, week: u32, day_of_week: u32) -> NaiveDate {
    let offset = u64::from((week - 1) * 7 + (day_of_week - 1));
    start + Days::new(offset)
}

pub fn session_name(week: u32, session_type: SessionType) -> String {
    format!("Week {} - {}", week, session_type)
}
