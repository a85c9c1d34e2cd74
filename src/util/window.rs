/// Bases kept upstream of the gene start, shared by `plot` and `bed`.
pub const DEFAULT_UPSTREAM: u32 = 200;
/// Bases kept downstream of the gene start, shared by `plot` and `bed`.
pub const DEFAULT_DOWNSTREAM: u32 = 30;

/// 基因起点两侧的侧翼窗口。
///
/// 比对图的相对坐标与 BED 区间必须使用同一组长度，两边结果才能互相对照。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub upstream: u32,
    pub downstream: u32,
}

impl Default for Window {
    fn default() -> Self {
        Self { upstream: DEFAULT_UPSTREAM, downstream: DEFAULT_DOWNSTREAM }
    }
}

impl Window {
    pub fn new(upstream: u32, downstream: u32) -> Self {
        Self { upstream, downstream }
    }

    /// 序列内偏移 -> 相对基因起点的坐标
    #[inline]
    pub fn relative(&self, raw: i64) -> i64 {
        raw - i64::from(self.upstream)
    }

    /// First relative coordinate covered by the window.
    #[inline]
    pub fn first(&self) -> i64 {
        -i64::from(self.upstream)
    }

    /// Last relative coordinate covered by the window (inclusive).
    #[inline]
    pub fn last(&self) -> i64 {
        i64::from(self.downstream)
    }
}
