use navmenu_engine::{MenuEngine, Presenter, SectionLoader};
use navmenu_error::{ErrorPolicy, ResultExt};

use super::*;

/// Applies every completed fetch that is waiting, without blocking.
///
/// Errors from the engine (failed loads, unexpected completions, broken builds) and a
/// closed event channel are handed to `policy`; none of them stop the pump early
/// except the closed channel. Returns the number of events applied.
pub fn pump_events<L, P>(
    engine: &mut MenuEngine<L, P>,
    events: &mut SectionEvents,
    policy: &impl ErrorPolicy,
) -> usize
where
    L: SectionLoader,
    P: Presenter,
{
    let mut applied = 0;
    loop {
        match events.try_next() {
            Ok(Some(event)) => {
                let _ = engine.apply_event(event).emit_event(policy);
                applied += 1;
            }
            Ok(None) => break,
            Err(e) => {
                let _ = Err::<(), _>(navmenu_error::Error::from(e)).emit_event(policy);
                break;
            }
        }
    }
    if applied > 0 {
        tracing::trace!(applied, "section events applied");
    }
    applied
}
