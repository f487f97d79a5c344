//! In-band step tracing.

use gyre_core::ActionId;

use crate::action::{Action, ActionResult};
use crate::context::StepContext;

/// Records a human-readable line per accepted step into its own record.
///
/// The trace lives in the propagation result like any other action record;
/// nothing is written to stdout or a logger during the loop.
#[derive(Clone, Copy, Debug, Default)]
pub struct StepLogger;

impl StepLogger {
    /// Identifier of the trace record.
    pub const ID: ActionId = ActionId("step_logger");

    /// A new step logger.
    pub fn new() -> Self {
        Self
    }
}

/// The accumulated step trace.
#[derive(Debug, Default)]
pub struct StepTrace {
    /// One formatted line per accepted step.
    pub lines: Vec<String>,
}

impl ActionResult for StepTrace {}

impl Action for StepLogger {
    fn id(&self) -> ActionId {
        Self::ID
    }

    fn new_result(&self) -> Box<dyn ActionResult> {
        Box::new(StepTrace::default())
    }

    fn act(&self, ctx: &mut StepContext<'_>, result: &mut dyn ActionResult) {
        let Some(trace) = result.downcast_mut::<StepTrace>() else {
            return;
        };
        let pos = ctx.track().position;
        let volume = ctx
            .volume()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".into());
        let surface = ctx
            .surface()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".into());
        trace.lines.push(format!(
            "step {:>4}: s={:+10.4} path={:+10.4} pos=({:9.3}, {:9.3}, {:9.3}) volume={volume} surface={surface}",
            ctx.steps(),
            ctx.step_length(),
            ctx.track().path_length,
            pos.x,
            pos.y,
            pos.z,
        ));
    }
}
