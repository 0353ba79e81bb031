//! Unit tests for bt-core.

#[cfg(test)]
mod geo {
    use crate::{Rect, Size, Vec2};

    #[test]
    fn vec2_arithmetic() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, -1.0);
        assert_eq!(a + b, Vec2::new(4.0, 1.0));
        assert_eq!(a - b, Vec2::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(a.dot(b), 1.0 * 3.0 + 2.0 * -1.0);
    }

    #[test]
    fn vec2_length_and_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.length(), 5.0);
    }

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(Vec2::new(0.0, 0.0), Size::new(10.0, 10.0));
        assert!(r.contains(Vec2::new(0.0, 0.0)));
        assert!(r.contains(Vec2::new(9.99, 9.99)));
        assert!(!r.contains(Vec2::new(10.0, 5.0)));
        assert!(!r.contains(Vec2::new(-0.01, 5.0)));
    }

    #[test]
    fn rect_overlaps() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Size::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(5.0, 5.0), Size::new(10.0, 10.0));
        let c = Rect::new(Vec2::new(20.0, 20.0), Size::new(5.0, 5.0));
        assert!(a.overlaps(b));
        assert!(b.overlaps(a));
        assert!(!a.overlaps(c));
    }

    #[test]
    fn rect_touching_edges_overlap() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Size::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(10.0, 0.0), Size::new(10.0, 10.0));
        assert!(a.overlaps(b));
    }
}

#[cfg(test)]
mod ids {
    use crate::{CellId, NodeId};

    #[test]
    fn default_is_invalid() {
        assert_eq!(NodeId::default(), NodeId::INVALID);
        assert_eq!(CellId::default(), CellId::INVALID);
    }

    #[test]
    fn index_roundtrip() {
        let id = NodeId(7);
        assert_eq!(id.index(), 7);
        assert_eq!(usize::from(id), 7);
    }

    #[test]
    fn ordering_by_inner_value() {
        assert!(NodeId(1) < NodeId(2));
        assert!(CellId(10) > CellId(3));
    }
}

#[cfg(test)]
mod rng {
    use crate::TreeRng;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = TreeRng::new(42);
        let mut b = TreeRng::new(42);
        for _ in 0..20 {
            assert_eq!(a.gen_range(0..1000), b.gen_range(0..1000));
        }
    }

    #[test]
    fn different_seed_usually_diverges() {
        let mut a = TreeRng::new(1);
        let mut b = TreeRng::new(2);
        let seq_a: Vec<u32> = (0..20).map(|_| a.gen_range(0..1_000_000)).collect();
        let seq_b: Vec<u32> = (0..20).map(|_| b.gen_range(0..1_000_000)).collect();
        assert_ne!(seq_a, seq_b);
    }

    #[test]
    fn choose_index_empty_is_none() {
        let mut r = TreeRng::new(0);
        assert_eq!(r.choose_index(0), None);
    }

    #[test]
    fn choose_index_in_bounds() {
        let mut r = TreeRng::new(7);
        for _ in 0..50 {
            let i = r.choose_index(5).unwrap();
            assert!(i < 5);
        }
    }
}
