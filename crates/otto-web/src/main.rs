mod board;
mod dom;
mod transport;

fn main() {
  console_error_panic_hook::set_once();
  wasm_tracing::set_as_global_default();

  tracing::info!(
    "starting otto board frontend"
  );

  if let Err(error) =
    board::mount_when_ready()
  {
    tracing::error!(%error, "board frontend failed to start");
  }
}
