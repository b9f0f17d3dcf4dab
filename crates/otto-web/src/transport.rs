use async_trait::async_trait;
use gloo::net::http::Request;
use otto_core::{
  CommandTransport,
  Reloader
};
use web_sys::Window;

/// Posts lifecycle commands with `fetch`.
pub struct HttpTransport;

#[async_trait(?Send)]
impl CommandTransport for HttpTransport {
  async fn post(
    &self,
    url: &str
  ) -> Result<u16, String> {
    let response = Request::post(url)
      .send()
      .await
      .map_err(|e| {
        format!("request error: {e}")
      })?;
    Ok(response.status())
  }
}

pub struct PageReloader {
  window: Window
}

impl PageReloader {
  pub fn new(window: Window) -> Self {
    Self {
      window
    }
  }
}

impl Reloader for PageReloader {
  fn reload(&self) {
    tracing::debug!("reloading board");
    if let Err(error) =
      self.window.location().reload()
    {
      tracing::error!(?error, "page reload failed");
    }
  }
}
