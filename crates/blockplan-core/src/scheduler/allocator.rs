//! Greedy placement of focus blocks into free slots.

use chrono::Duration;

use crate::interval::Interval;
use crate::preferences::SchedulingPreferences;
use crate::schedule::{FreeSlot, TaskRef, TimeBlock};

/// Place one block per task, in task order, walking the slots in the order
/// given.
///
/// Within a slot, blocks are laid end to end with a break after each one. A
/// block is only placed if it fits before the slot end, and the next block
/// is only attempted if the trailing break also fits; a dangling partial
/// break ends the slot. Tasks are never reordered or split. Running out of
/// tasks or slots just ends allocation early.
pub fn allocate_blocks(
    slots: &[FreeSlot],
    tasks: &[TaskRef],
    prefs: &SchedulingPreferences,
) -> Vec<TimeBlock> {
    let focus = prefs.focus_block_duration();
    let gap = prefs.break_duration();
    if focus <= Duration::zero() {
        tracing::warn!(
            focus_minutes = prefs.focus_block_minutes,
            break_minutes = prefs.break_minutes,
            "non-positive block duration; nothing allocated"
        );
        return Vec::new();
    }

    let mut blocks = Vec::new();
    let mut pending = tasks.iter().peekable();

    for slot in slots {
        if pending.peek().is_none() {
            break;
        }

        let mut cursor = slot.start();
        while cursor + focus <= slot.end() {
            let Some(task) = pending.next() else {
                break;
            };
            let Some(span) = Interval::starting_at(cursor, focus) else {
                break;
            };
            blocks.push(TimeBlock::for_task(task, span));

            let block_end = span.end();
            if block_end + gap > slot.end() {
                break;
            }
            cursor = block_end + gap;
        }
    }

    tracing::debug!(
        placed = blocks.len(),
        unplaced = pending.count(),
        "focus blocks allocated"
    );
    blocks
}
