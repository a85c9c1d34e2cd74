/// 比对图的碱基编码顺序：A=0, G=1, T=2, C=3（与调色板顺序一致）
pub type Code = u8;

#[inline]
pub fn to_code(b: u8) -> Option<Code> {
    match b.to_ascii_uppercase() {
        b'A' => Some(0),
        b'G' => Some(1),
        b'T' => Some(2),
        b'C' => Some(3),
        _ => None, // N 及其他字符没有编码
    }
}

/// 大写化；A/C/G/T 以外的字符（含 IUPAC 简并碱基、gap）一律归为 N
#[inline]
pub fn normalize_base(b: u8) -> u8 {
    let up = b.to_ascii_uppercase();
    match up {
        b'A' | b'C' | b'G' | b'T' => up,
        _ => b'N',
    }
}
