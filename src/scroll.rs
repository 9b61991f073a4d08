//! Three-row paging window shared by the crew and pass-time lists.
//!
//! Navigation only nudges `selected`; the window is re-derived against the
//! current list length on every paint. That keeps the cursor valid when the
//! list changes size between frames without any resize hook.

/// Rows visible below the title on the 128x32 panel.
pub const PAGE: usize = 3;

/// Cursor and window start for a paginated list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListWindow {
    /// May sit at -1 or `n` between a button press and the next paint.
    selected: isize,
    base: usize,
}

impl ListWindow {
    pub fn selected(&self) -> isize {
        self.selected
    }

    pub fn base(&self) -> usize {
        self.base
    }

    pub fn step_up(&mut self) {
        self.selected -= 1;
    }

    pub fn step_down(&mut self) {
        self.selected += 1;
    }

    /// Bring the cursor and window back in bounds for a list of `n` items.
    ///
    /// One pass applies the first matching rule; passes repeat until nothing
    /// changes so the result is stable after a single call.
    pub fn settle(&mut self, n: usize) {
        loop {
            let before = *self;
            self.settle_once(n);
            if *self == before {
                break;
            }
        }
    }

    fn settle_once(&mut self, n: usize) {
        if self.selected < 0 {
            // Wrap to the last item and the page that holds it.
            if n == 0 {
                self.selected = 0;
                self.base = 0;
            } else {
                self.selected = n as isize - 1;
                self.base = last_page_start(n);
            }
        } else if self.selected as usize >= self.base + PAGE {
            self.base += PAGE;
        } else if self.selected as usize >= n {
            self.selected = 0;
            self.base = 0;
        } else if (self.selected as usize) < self.base {
            self.base -= PAGE;
        }
    }

    /// Indices to draw, paired with the display line and highlight flag.
    /// Data rows start on line 1 under the title.
    pub fn rows(&self, n: usize) -> impl Iterator<Item = (u8, usize, bool)> + '_ {
        (self.base..(self.base + PAGE).min(n)).map(move |index| {
            let line = (index - self.base + 1) as u8;
            (line, index, index as isize == self.selected)
        })
    }
}

/// Start of the final page. A list that fills its last page exactly starts
/// that page at `n - PAGE`, not at `n`.
fn last_page_start(n: usize) -> usize {
    match n % PAGE {
        0 => n - PAGE,
        r => n - r,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn at(selected: isize, base: usize) -> ListWindow {
        ListWindow { selected, base }
    }

    #[test]
    fn wrap_up_lands_on_partial_last_page() {
        let mut w = at(-1, 0);
        w.settle(7);
        assert_eq!((w.selected(), w.base()), (6, 6));
    }

    #[test]
    fn wrap_up_on_exact_multiple_uses_previous_page() {
        let mut w = at(-1, 0);
        w.settle(6);
        assert_eq!((w.selected(), w.base()), (5, 3));
    }

    #[test]
    fn wrap_up_on_short_list() {
        let mut w = at(-1, 0);
        w.settle(3);
        assert_eq!((w.selected(), w.base()), (2, 0));

        let mut w = at(-1, 0);
        w.settle(1);
        assert_eq!((w.selected(), w.base()), (0, 0));
    }

    #[test]
    fn empty_list_resets_cursor() {
        for start in [at(-1, 0), at(0, 0), at(4, 3), at(7, 6)] {
            let mut w = start;
            w.settle(0);
            assert_eq!((w.selected(), w.base()), (0, 0), "from {start:?}");
        }
    }

    #[test]
    fn stepping_down_advances_page() {
        let mut w = ListWindow::default();
        for _ in 0..3 {
            w.step_down();
            w.settle(7);
        }
        assert_eq!((w.selected(), w.base()), (3, 3));
    }

    #[test]
    fn stepping_up_retreats_page() {
        let mut w = at(3, 3);
        w.step_up();
        w.settle(7);
        assert_eq!((w.selected(), w.base()), (2, 0));
    }

    #[test]
    fn down_past_end_wraps_to_top() {
        let mut w = at(6, 6);
        w.step_down();
        w.settle(7);
        assert_eq!((w.selected(), w.base()), (0, 0));

        // Exact multiple: the page advance runs first, then the reset.
        let mut w = at(5, 3);
        w.step_down();
        w.settle(6);
        assert_eq!((w.selected(), w.base()), (0, 0));
    }

    #[test]
    fn shrinking_list_settles_in_one_paint() {
        let mut w = at(2, 0);
        w.step_down();
        w.settle(2);
        assert_eq!((w.selected(), w.base()), (0, 0));
    }

    #[test]
    fn rows_cover_visible_slice_only() {
        let w = at(7, 6);
        let rows: Vec<_> = w.rows(8).collect();
        assert_eq!(rows, vec![(1, 6, false), (2, 7, true)]);
        assert_eq!(ListWindow::default().rows(0).count(), 0);
    }

    fn nav_strategy() -> impl Strategy<Value = Vec<bool>> {
        proptest::collection::vec(any::<bool>(), 0..40)
    }

    proptest! {
        #[test]
        fn window_always_contains_selection(n in 0usize..20, presses in nav_strategy()) {
            let mut w = ListWindow::default();
            w.settle(n);
            for down in presses {
                if down { w.step_down() } else { w.step_up() }
                w.settle(n);
                if n == 0 {
                    prop_assert_eq!((w.selected(), w.base()), (0, 0));
                } else {
                    let sel = w.selected();
                    prop_assert!(sel >= 0 && (sel as usize) < n);
                    prop_assert!(w.base() <= sel as usize && (sel as usize) < w.base() + PAGE);
                }
            }
        }

        #[test]
        fn settle_is_idempotent(n in 0usize..20, selected in -1isize..25, page in 0usize..8) {
            let mut w = at(selected, page * PAGE);
            w.settle(n);
            let once = w;
            w.settle(n);
            prop_assert_eq!(w, once);
        }

        #[test]
        fn up_then_down_returns_to_top(n in 1usize..20) {
            let mut w = ListWindow::default();
            w.settle(n);
            w.step_up();
            w.settle(n);
            w.step_down();
            w.settle(n);
            prop_assert_eq!(w.selected(), 0);
        }

        #[test]
        fn down_then_up_returns_to_last(n in 1usize..20) {
            let mut w = ListWindow::default();
            w.step_up();
            w.settle(n);
            prop_assert_eq!(w.selected(), n as isize - 1);
            w.step_down();
            w.settle(n);
            w.step_up();
            w.settle(n);
            prop_assert_eq!(w.selected(), n as isize - 1);
        }
    }
}
