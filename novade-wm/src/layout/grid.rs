//! Grid placement shared by tiling and stage mode.

use novade_core::types::RectInt;

/// Returns `(cols, rows)` for `count` cells: `cols = max(1, floor(sqrt(count)))`,
/// `rows = ceil(count / cols)`. An empty grid is `(0, 0)`.
pub fn grid_dimensions(count: usize) -> (usize, usize) {
    if count == 0 {
        return (0, 0);
    }
    let mut cols = (count as f64).sqrt() as usize;
    // Correct for float rounding on perfect squares.
    while (cols + 1) * (cols + 1) <= count {
        cols += 1;
    }
    while cols > 1 && cols * cols > count {
        cols -= 1;
    }
    let cols = cols.max(1);
    let rows = (count + cols - 1) / cols;
    (cols, rows)
}

/// Computes `count` row-major cells over `area`, separated and surrounded by
/// `padding` pixels. With zero padding the cells are edge to edge; the integer
/// division remainder is left unused.
pub fn grid_cells(area: RectInt, count: usize, padding: u32) -> Vec<RectInt> {
    let (cols, rows) = grid_dimensions(count);
    if cols == 0 || rows == 0 {
        return Vec::new();
    }

    let gaps_x = padding.saturating_mul(cols as u32 + 1);
    let gaps_y = padding.saturating_mul(rows as u32 + 1);
    let cell_width = area.width().saturating_sub(gaps_x) / cols as u32;
    let cell_height = area.height().saturating_sub(gaps_y) / rows as u32;
    let step_x = cell_width.saturating_add(padding);
    let step_y = cell_height.saturating_add(padding);

    (0..count)
        .map(|i| {
            let col = (i % cols) as u32;
            let row = (i / cols) as u32;
            let x = area.x().saturating_add(to_offset(padding.saturating_add(col.saturating_mul(step_x))));
            let y = area.y().saturating_add(to_offset(padding.saturating_add(row.saturating_mul(step_y))));
            RectInt::from_coords(x, y, cell_width, cell_height)
        })
        .collect()
}

// Offsets past i32::MAX clamp instead of wrapping negative.
fn to_offset(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
