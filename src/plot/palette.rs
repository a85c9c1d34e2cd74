use plotters::style::RGBColor;

use crate::util::dna::Code;

/// matplotlib `tab20` 的前五个颜色
const TAB20: [RGBColor; 5] = [
    RGBColor(31, 119, 180),
    RGBColor(174, 199, 232),
    RGBColor(255, 127, 14),
    RGBColor(255, 187, 120),
    RGBColor(44, 160, 44),
];

/// A, G, T, C in code order.
pub const BASE_COLORS: [RGBColor; 4] = [TAB20[0], TAB20[1], TAB20[2], TAB20[3]];
/// N and cells without data (xkcd grey).
pub const MISSING_COLOR: RGBColor = RGBColor(146, 149, 145);
/// Codes above the normal range, i.e. collapsed paralogs.
pub const COLLAPSED_COLOR: RGBColor = TAB20[4];

pub fn cell_color(cell: Option<Option<Code>>) -> RGBColor {
    match cell {
        Some(Some(code)) => BASE_COLORS.get(code as usize).copied().unwrap_or(COLLAPSED_COLOR),
        _ => MISSING_COLOR,
    }
}

pub fn legend() -> [(&'static str, RGBColor); 5] {
    [
        ("A", BASE_COLORS[0]),
        ("G", BASE_COLORS[1]),
        ("T", BASE_COLORS[2]),
        ("C", BASE_COLORS[3]),
        ("N", MISSING_COLOR),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aln::COLLAPSED_CODE;

    #[test]
    fn colors_by_cell_kind() {
        assert_eq!(cell_color(Some(Some(0))), BASE_COLORS[0]);
        assert_eq!(cell_color(Some(Some(3))), BASE_COLORS[3]);
        assert_eq!(cell_color(Some(Some(COLLAPSED_CODE))), COLLAPSED_COLOR);
        assert_eq!(cell_color(Some(None)), MISSING_COLOR);
        assert_eq!(cell_color(None), MISSING_COLOR);
    }

    #[test]
    fn legend_lists_bases_in_code_order() {
        let labels: Vec<&str> = legend().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, ["A", "G", "T", "C", "N"]);
    }
}
