use geowarp_image::ImageError;

/// Create the source coordinate maps of a `rows x cols` destination grid.
///
/// # Arguments
///
/// * `cols` - The number of columns indicating the width of the grid
/// * `rows` - The number of rows indicating the height of the grid
/// * `f` - Maps a destination pixel `(x, y)` to its source coordinate `(u, v)`
///
/// # Returns
///
/// A tuple of row-major maps of length `rows * cols` with the x and y
/// source coordinates.
pub fn meshgrid_from_fn(
    cols: usize,
    rows: usize,
    f: impl Fn(usize, usize) -> Result<(f32, f32), ImageError>,
) -> Result<(Vec<f32>, Vec<f32>), ImageError> {
    let mut map_x = Vec::with_capacity(rows * cols);
    let mut map_y = Vec::with_capacity(rows * cols);

    for y in 0..rows {
        for x in 0..cols {
            let (u, v) = f(x, y)?;
            map_x.push(u);
            map_y.push(v);
        }
    }

    Ok((map_x, map_y))
}

#[cfg(test)]
mod tests {
    use geowarp_image::ImageError;

    #[test]
    fn meshgrid_identity() -> Result<(), ImageError> {
        let (map_x, map_y) = super::meshgrid_from_fn(3, 2, |x, y| Ok((x as f32, y as f32)))?;
        assert_eq!(map_x, vec![0.0, 1.0, 2.0, 0.0, 1.0, 2.0]);
        assert_eq!(map_y, vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        Ok(())
    }
}
