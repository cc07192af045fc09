use super::Rect;

/// Directional outcome of a rectangle collision, from `a`'s point of view.
///
/// `Up` means `a` sits above `b` and should separate upward; `Down`, `Left`
/// and `Right` follow the same convention. Callers rely on this polarity to
/// flip velocities, so it must not be renamed or inverted.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Contact {
    Up,
    Down,
    Left,
    Right,
}

/// Classifies the overlap between two rectangles.
///
/// Returns `None` when the rectangles do not overlap (edge contact counts
/// as no overlap). Otherwise the shallower penetration axis decides the
/// separation direction: a wide, flat overlap resolves vertically, anything
/// else horizontally. Within the chosen axis the rectangles' positions
/// break the tie with a strict `>`, so exact position ties resolve to
/// `Up`/`Right`, and a square overlap takes the horizontal branch.
///
/// This is a heuristic, not a swept solve; deep corner overlaps can
/// misclassify. Fine for thin walls and a single fast body.
pub fn collide(a: Rect, b: Rect) -> Option<Contact> {
    debug_assert!(a.w >= 0.0 && a.h >= 0.0, "collide: negative extents on a");
    debug_assert!(b.w >= 0.0 && b.h >= 0.0, "collide: negative extents on b");

    let overlap = a.intersect(b)?;

    let contact = if overlap.w > overlap.h {
        if a.y > b.y { Contact::Down } else { Contact::Up }
    } else if a.x > b.x {
        Contact::Left
    } else {
        Contact::Right
    };

    Some(contact)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(x, y, w, h)
    }

    // ── no overlap ────────────────────────────────────────────────────────

    #[test]
    fn disjoint_is_none_both_ways() {
        let a = r(0.0, 0.0, 5.0, 5.0);
        let b = r(100.0, 100.0, 5.0, 5.0);
        assert_eq!(collide(a, b), None);
        assert_eq!(collide(b, a), None);
    }

    #[test]
    fn edge_contact_is_none() {
        let a = r(0.0, 0.0, 10.0, 10.0);
        let b = r(10.0, 0.0, 10.0, 10.0);
        assert_eq!(collide(a, b), None);
    }

    #[test]
    fn none_is_symmetric() {
        let cases = [
            (r(0.0, 0.0, 10.0, 10.0), r(5.0, 5.0, 10.0, 10.0)),
            (r(0.0, 0.0, 20.0, 5.0), r(0.0, 4.0, 20.0, 20.0)),
            (r(0.0, 0.0, 5.0, 5.0), r(6.0, 6.0, 5.0, 5.0)),
            (r(0.0, 0.0, 5.0, 5.0), r(5.0, 5.0, 5.0, 5.0)),
        ];
        for (a, b) in cases {
            assert_eq!(collide(a, b).is_none(), collide(b, a).is_none());
        }
    }

    // ── axis classification ───────────────────────────────────────────────

    #[test]
    fn wide_shallow_overlap_resolves_vertically() {
        // Overlap is 20x1: wider than tall, so the contact is top/bottom.
        let a = r(0.0, 0.0, 20.0, 5.0);
        let b = r(0.0, 4.0, 20.0, 20.0);
        assert_eq!(collide(a, b), Some(Contact::Up));
        assert_eq!(collide(b, a), Some(Contact::Down));
    }

    #[test]
    fn tall_narrow_overlap_resolves_horizontally() {
        let a = r(0.0, 0.0, 5.0, 20.0);
        let b = r(4.0, 0.0, 20.0, 20.0);
        assert_eq!(collide(a, b), Some(Contact::Right));
        assert_eq!(collide(b, a), Some(Contact::Left));
    }

    // ── ties ──────────────────────────────────────────────────────────────

    #[test]
    fn square_overlap_takes_horizontal_branch() {
        // 5x5 overlap: width is not strictly greater than height, so the
        // horizontal branch wins, and a.x(0) > b.x(5) is false => Right.
        let a = r(0.0, 0.0, 10.0, 10.0);
        let b = r(5.0, 5.0, 10.0, 10.0);
        assert_eq!(collide(a, b), Some(Contact::Right));
    }

    #[test]
    fn identical_positions_resolve_to_right() {
        // x tie: strict > fails, so the else branch wins.
        let a = r(0.0, 0.0, 10.0, 10.0);
        assert_eq!(collide(a, a), Some(Contact::Right));
    }

    #[test]
    fn vertical_position_tie_resolves_to_up() {
        // Wide overlap forces the vertical axis; equal y means not >, so Up.
        let a = r(0.0, 0.0, 20.0, 4.0);
        let b = r(0.0, 0.0, 20.0, 20.0);
        assert_eq!(collide(a, b), Some(Contact::Up));
    }
}
