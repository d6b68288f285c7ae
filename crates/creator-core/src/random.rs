//! 随机源
//!
//! 学员互动率、人脸验证结果以及模拟事件全部来自同一个可播种的随机源，
//! 固定种子即可重放整个会话。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 新学员互动率区间 [70, 100)
pub const ENGAGEMENT_RATE_RANGE: std::ops::Range<u32> = 70..100;

#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
    seed: Option<u64>,
}

impl RandomSource {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            seed: None,
        }
    }

    /// 配置了种子则使用种子，否则使用系统熵
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// 新学员的互动率
    pub fn engagement_rate(&mut self) -> u32 {
        self.rng.random_range(ENGAGEMENT_RATE_RANGE)
    }

    /// 以概率 p 返回 true，p 会被截断到 [0, 1]，NaN 和无穷视为 0
    pub fn chance(&mut self, p: f64) -> bool {
        let p = if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 };
        self.rng.random_bool(p)
    }

    /// [0, upper) 范围内的下标，upper 为 0 时返回 0
    pub fn index(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        self.rng.random_range(0..upper)
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.index(items.len());
        items.get(idx)
    }

    /// 暴露底层 RNG，供需要 `Rng` 的生成器使用
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}
