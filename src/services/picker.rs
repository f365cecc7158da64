//! # 무작위 선택 추상화
//!
//! 운동 선택기는 동점 후보 중 하나를 무작위로 고릅니다.
//! 전역 난수원을 직접 쓰지 않고 `Picker` 트레이트를 주입받으므로,
//! 테스트에서는 항상 같은 결과를 내는 구현으로 바꿔 끼울 수 있습니다.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 후보 목록에서 하나를 고르는 능력
///
/// `len`개의 후보 중 고른 인덱스(`0..len`)를 반환합니다. `len`은 항상 1 이상입니다.
pub trait Picker {
    fn pick_index(&mut self, len: usize) -> usize;

    /// 슬라이스에서 하나를 고릅니다. 비어 있으면 `None`.
    fn pick<'a, T>(&mut self, candidates: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if candidates.is_empty() {
            return None;
        }
        let index = self.pick_index(candidates.len()).min(candidates.len() - 1);
        candidates.get(index)
    }
}

/// 운영용 균등 분포 선택기
///
/// `StdRng`는 `Send`이므로 async 핸들러 안에서 `.await`를 넘어 들고 있어도 됩니다.
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// 고정 시드. 같은 시드면 같은 선택 순서
    #[cfg(test)]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl Picker for RandomPicker {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// 항상 첫 번째 후보를 고르는 결정적 선택기 (테스트용)
#[cfg(test)]
pub struct FirstPicker;

#[cfg(test)]
impl Picker for FirstPicker {
    fn pick_index(&mut self, _len: usize) -> usize {
        0
    }
}
