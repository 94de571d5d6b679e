use gridconv::{ConvError, Grid, Shape};

#[test]
fn grid_get_set() {
    let mut g = Grid::zeros(3, 4).unwrap();
    g.set(2, 3, 42.0);
    assert_eq!(g.get(2, 3), 42.0);
    assert_eq!(g.as_slice()[11], 42.0);
}

#[test]
fn grid_fill() {
    let mut g = Grid::zeros(2, 2).unwrap();
    g.fill(7.0);
    assert_eq!(g.get(0, 0), 7.0);
    assert_eq!(g.get(1, 1), 7.0);
}

#[test]
fn grid_is_row_major() {
    let g = Grid::from_fn(2, 3, |r, c| (r * 10 + c) as f32).unwrap();
    assert_eq!(g.as_slice(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
    assert_eq!(g.row(1), &[10.0, 11.0, 12.0]);
    assert_eq!(g.rows_iter().count(), 2);
}

#[test]
fn grid_from_vec_checks_length() {
    let err = Grid::from_vec(2, 2, vec![1.0; 3]).unwrap_err();
    assert_eq!(err, ConvError::BufferSize { expected: 4, actual: 3 });
}

#[test]
fn grid_rejects_zero_dims() {
    assert!(matches!(Grid::zeros(0, 3), Err(ConvError::InvalidShape { .. })));
    assert!(matches!(Grid::from_fn(3, 0, |_, _| 0.0), Err(ConvError::InvalidShape { .. })));
}

#[test]
fn shape_validate() {
    assert_eq!(Shape::new(3, 5).validate("grid"), Ok(15));
    assert!(Shape::new(0, 5).validate("grid").is_err());
    assert!(Shape::new(usize::MAX, 2).validate("grid").is_err());
    assert_eq!(Shape::new(3, 5).to_string(), "3x5");
}

#[test]
fn grid_display_rows() {
    let g = Grid::from_vec(2, 2, vec![1.0, 2.5, 3.0, 4.0]).unwrap();
    assert_eq!(g.to_string(), "1, 2.5, \n3, 4, \n");
}

#[test]
fn invalid_shape_message_names_the_array() {
    let err = Shape::new(0, 2).validate("window").unwrap_err();
    assert!(err.to_string().starts_with("invalid window shape 0x2"));
}
