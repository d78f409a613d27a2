//! Live drop preview: which depth and parent a dragged folder would take.

use tracing::trace;

use foldertree_core::types::FolderId;
use foldertree_entity::folder::{FlattenedItem, Projection};

/// Project the drop position of `active_id` hovering over `over_id`.
///
/// `items` is the visible list: collapsed subtrees and the dragged folder's
/// own descendants removed, the dragged folder itself still present. The
/// dragged row is moved to the hovered row's index; its neighbours there
/// bound the depth:
///
/// - at most one level deeper than the row above (`max_depth`),
/// - at least as deep as the row below (`min_depth`), so the row below keeps
///   its parent.
///
/// Within those bounds the depth follows the horizontal pointer travel,
/// `round(drag_offset_x / indent_width)` levels away from the dragged
/// folder's current depth. Returns `None` when either id is not visible.
pub fn project(
    items: &[FlattenedItem],
    active_id: FolderId,
    over_id: FolderId,
    drag_offset_x: f64,
    indent_width: f64,
) -> Option<Projection> {
    let over_ix = items.iter().position(|item| item.id() == over_id)?;
    let active_ix = items.iter().position(|item| item.id() == active_id)?;
    let active = &items[active_ix];

    // Row `ix` of the list with the dragged folder taken out.
    let without_active = |ix: usize| {
        if ix < active_ix {
            &items[ix]
        } else {
            &items[ix + 1]
        }
    };
    let remaining = items.len() - 1;

    let previous = over_ix.checked_sub(1).map(without_active);
    let next = (over_ix < remaining).then(|| without_active(over_ix));

    let max_depth = previous.map_or(0, |item| item.depth + 1);
    let min_depth = next.map_or(0, |item| item.depth);

    let wanted = active.depth as i64 + depth_delta(drag_offset_x, indent_width);
    let depth = if wanted >= max_depth as i64 {
        max_depth
    } else if wanted < min_depth as i64 {
        min_depth
    } else {
        wanted as usize
    };

    let parent_id = if depth == 0 {
        None
    } else {
        (0..over_ix)
            .rev()
            .map(without_active)
            .find(|item| item.depth == depth - 1)
            .map(FlattenedItem::id)
    };

    trace!(
        active_id = %active_id,
        over_id = %over_id,
        depth,
        min_depth,
        max_depth,
        "Projected drop"
    );

    Some(Projection {
        depth,
        parent_id,
        over_id,
        min_depth,
        max_depth,
    })
}

/// Whole indentation levels covered by a horizontal drag.
fn depth_delta(drag_offset_x: f64, indent_width: f64) -> i64 {
    if !(indent_width > 0.0) || !drag_offset_x.is_finite() {
        return 0;
    }
    (drag_offset_x / indent_width).round() as i64
}
