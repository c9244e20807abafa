// crates/cpt_foundation/src/numerics.rs

//! 数值工具
//!
//! - [`KahanSum`]: 补偿求和
//! - [`cap`]: 保留 NaN 的上限钳位

/// Kahan 补偿求和
///
/// 液化指标按深度逐行积分累加，使用 Kahan 算法减少累加误差。
///
/// # 示例
///
/// ```rust
/// use cpt_foundation::numerics::KahanSum;
///
/// let mut sum = KahanSum::new();
/// for _ in 0..1000 {
///     sum.add(0.1);
/// }
/// assert!((sum.value() - 100.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct KahanSum {
    sum: f64,
    compensation: f64,
}

impl KahanSum {
    /// 创建新的求和器
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加一个值
    #[inline]
    pub fn add(&mut self, value: f64) {
        let y = value - self.compensation;
        let t = self.sum + y;
        self.compensation = (t - self.sum) - y;
        self.sum = t;
    }

    /// 获取当前求和值
    #[inline]
    pub fn value(&self) -> f64 {
        self.sum
    }
}

/// 上限钳位，NaN 保持不变
///
/// 与 `f64::min` 不同：`f64::min(NaN, c)` 返回 `c`，而经验公式链要求
/// 无定义的输入继续传播为无定义。
#[inline]
pub fn cap(value: f64, ceiling: f64) -> f64 {
    if value > ceiling {
        ceiling
    } else {
        value
    }
}
