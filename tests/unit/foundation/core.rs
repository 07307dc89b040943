use super::*;

fn bb(x: u32, y: u32, w: u32, h: u32) -> BoundingBox {
    BoundingBox::new(x, y, w, h).unwrap()
}

#[test]
fn touching_edges_do_not_overlap() {
    let a = bb(0, 0, 10, 10);
    let right = bb(10, 0, 10, 10);
    let below = bb(0, 10, 10, 10);
    assert!(!a.overlaps(&right));
    assert!(!a.overlaps(&below));
    assert!(a.overlaps(&bb(9, 9, 5, 5)));
    assert!(bb(9, 9, 5, 5).overlaps(&a));
}

#[test]
fn empty_and_negative_boxes_are_rejected() {
    assert!(BoundingBox::new(0, 0, 0, 5).is_err());
    assert!(BoundingBox::new(0, 0, 5, 0).is_err());
    assert!(BoundingBox::from_signed(-1, 0, 5, 5).is_err());
    assert!(BoundingBox::from_signed(0, -3, 5, 5).is_err());
    assert_eq!(BoundingBox::from_signed(2, 3, 4, 5).unwrap(), bb(2, 3, 4, 5));
}

#[test]
fn derived_edges_and_center() {
    let a = bb(10, 20, 30, 40);
    assert_eq!(a.right(), 40);
    assert_eq!(a.bottom(), 60);
    assert_eq!(a.center(), Point::new(25.0, 40.0));
    assert_eq!(a.to_rect(), Rect::new(10.0, 20.0, 40.0, 60.0));
}

#[test]
fn union_and_containment() {
    let a = bb(0, 0, 10, 10);
    let b = bb(20, 5, 10, 10);
    let u = a.union(&b);
    assert_eq!(u, bb(0, 0, 30, 15));
    assert!(u.contains_box(&a));
    assert!(u.contains_box(&b));
    assert!(!a.contains_box(&u));
}

#[test]
fn canvas_fit_is_edge_inclusive() {
    let canvas = Canvas::default();
    assert_eq!((canvas.width, canvas.height), (1920, 1080));
    assert!(bb(1900, 1060, 20, 20).fits_canvas(canvas));
    assert!(!bb(1900, 1060, 21, 20).fits_canvas(canvas));
    assert!(Canvas::new(0, 10).is_err());
}
