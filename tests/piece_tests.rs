//! Piece tests - catalog shapes, spawn placement, rotation

use blockdrop::core::{Grid, Piece, Shape};
use blockdrop::types::{Color, PieceKind};

#[test]
fn test_four_rotations_return_spawn_shape() {
    for kind in PieceKind::ALL {
        let shape = Shape::of(kind);
        let turned = shape.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
        assert_eq!(turned, shape, "{:?}", kind);
    }
}

#[test]
fn test_rotation_swaps_bounding_box() {
    for kind in PieceKind::ALL {
        let shape = Shape::of(kind);
        let rotated = shape.rotated_cw();
        assert_eq!(rotated.rows(), shape.cols(), "{:?}", kind);
        assert_eq!(rotated.cols(), shape.rows(), "{:?}", kind);
        assert_eq!(rotated.filled_offsets().count(), 4, "{:?}", kind);
    }
}

#[test]
fn test_o_piece_rotation_is_identity() {
    let o = Shape::of(PieceKind::O);
    assert_eq!(o.rotated_cw(), o);
}

#[test]
fn test_s_and_z_rotations() {
    let s = Shape::of(PieceKind::S).rotated_cw();
    assert_eq!(s, Shape::from_rows(&[&[1, 0], &[1, 1], &[0, 1]]).unwrap());

    let z = Shape::of(PieceKind::Z).rotated_cw();
    assert_eq!(z, Shape::from_rows(&[&[0, 1], &[1, 1], &[1, 0]]).unwrap());
}

#[test]
fn test_l_and_j_rotations() {
    let l = Shape::of(PieceKind::L).rotated_cw();
    assert_eq!(l, Shape::from_rows(&[&[1, 1], &[0, 1], &[0, 1]]).unwrap());

    let j = Shape::of(PieceKind::J).rotated_cw();
    assert_eq!(j, Shape::from_rows(&[&[0, 1], &[0, 1], &[1, 1]]).unwrap());
}

#[test]
fn test_spawn_positions_on_default_grid() {
    let expected = [
        (PieceKind::I, 4),
        (PieceKind::T, 5),
        (PieceKind::L, 5),
        (PieceKind::J, 5),
        (PieceKind::O, 5),
        (PieceKind::S, 5),
        (PieceKind::Z, 5),
    ];
    for (kind, x) in expected {
        let piece = Piece::spawn(kind, Color::Red, 13);
        assert_eq!(piece.position(), (x, 0), "{:?}", kind);
    }
}

#[test]
fn test_collides_at_walls_and_floor() {
    let grid = Grid::new(6, 6);
    let o = Piece::spawn(PieceKind::O, Color::Red, 6).at(0, 4);

    assert!(!o.collides(&grid));
    assert!(o.collides_at(&grid, -1, 0));
    assert!(o.collides_at(&grid, 0, 1));
    assert!(!o.collides_at(&grid, 4, 0));
    assert!(o.collides_at(&grid, 5, 0));
}

#[test]
fn test_shifted_leaves_original_in_place() {
    let grid = Grid::new(6, 6);
    let piece = Piece::spawn(PieceKind::J, Color::Orange, 6);
    let moved = piece.shifted(1, 2);

    assert_eq!(piece.position(), (2, 0));
    assert_eq!(moved.position(), (3, 2));
    assert_eq!(moved.shape(), piece.shape());
    assert_eq!(moved.collides(&grid), piece.collides_at(&grid, 1, 2));
}

#[test]
fn test_collides_with_locked_cell() {
    let mut grid = Grid::new(6, 6);
    grid.set(3, 3, Some(Color::Blue));
    let t = Piece::spawn(PieceKind::T, Color::Red, 6).at(2, 1);

    assert!(!t.collides(&grid));
    // The stem at (3, 2) would land on (3, 3).
    assert!(t.collides_at(&grid, 0, 1));
}

#[test]
fn test_from_rows_rejects_oversized() {
    assert!(Shape::from_rows(&[&[1, 1, 1, 1, 1]]).is_none());
    assert!(Shape::from_rows(&[]).is_none());
    assert!(Shape::from_rows(&[&[]]).is_none());
}
