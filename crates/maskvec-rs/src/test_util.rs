use crate::types::Bitmap;

/// Build a bitmap from rows of `#` (set) and `.` (unset).
pub(crate) fn bitmap(rows: &[&str]) -> Bitmap {
    let h = rows.len() as u32;
    let w = rows.first().map_or(0, |r| r.len()) as u32;
    let data = rows
        .iter()
        .flat_map(|r| r.chars().map(|c| c == '#'))
        .collect();
    Bitmap::from_vec(w, h, data).unwrap()
}
