// stepwise/examples/basic_workflow.rs

use stepwise::{SharedContext, StepControl, StepwiseError, Workflow, WorkflowOutcome};
use tracing::{info, warn};

#[derive(Clone, Debug, Default)]
struct ReservationContext {
  seats_requested: u32,
  seats_held: u32,
  log: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
enum ReservationError {
  #[error("not enough seats: wanted {0}")]
  SoldOut(u32),

  #[error(transparent)]
  Engine(#[from] StepwiseError),
}

fn build_workflow(capacity: u32) -> Workflow<ReservationContext, ReservationError> {
  let mut workflow = Workflow::<ReservationContext, ReservationError>::new(&[
    ("check_capacity", false, None),
    ("hold_seats", false, None),
    ("notify", true, None), // Optional: failures here are swallowed by the handler
  ]);

  workflow.on("check_capacity", move |ctx: SharedContext<ReservationContext>| async move {
    let wanted = ctx.read().seats_requested;
    if wanted == 0 {
      ctx.write().log.push("nothing to reserve".to_string());
      return Ok(StepControl::Stop);
    }
    if wanted > capacity {
      return Err(ReservationError::SoldOut(wanted));
    }
    Ok(StepControl::Continue)
  });

  workflow.on("hold_seats", |ctx: SharedContext<ReservationContext>| async move {
    let mut data = ctx.write();
    data.seats_held = data.seats_requested;
    let line = format!("held {} seats", data.seats_held);
    data.log.push(line);
    Ok::<_, ReservationError>(StepControl::Continue)
  });

  workflow.on("notify", |ctx: SharedContext<ReservationContext>| async move {
    let held = ctx.read().seats_held;
    info!(held, "Sending confirmation.");
    Ok::<_, ReservationError>(StepControl::Continue)
  });

  workflow
}

#[tokio::main]
async fn main() -> Result<(), ReservationError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  let workflow = build_workflow(10);
  info!(steps = ?workflow.step_names(), "--- Basic Workflow Example ---");

  for seats_requested in [3, 0, 12] {
    let ctx = SharedContext::new(ReservationContext {
      seats_requested,
      ..Default::default()
    });

    match workflow.run(ctx.clone()).await {
      Ok(WorkflowOutcome::Completed) => info!(log = ?ctx.read().log, "Reservation completed."),
      Ok(WorkflowOutcome::Stopped { step }) => info!(%step, log = ?ctx.read().log, "Reservation stopped early."),
      Err(e) => warn!(error = %e, "Reservation failed."),
    }
  }

  Ok(())
}
