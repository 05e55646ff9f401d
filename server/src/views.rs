//! Server-rendered preview shell
//!
//! The shell embeds the sandboxed frame with the capability allow-list and
//! a loading overlay, and wires the browser's own broadcast primitive to
//! the frame when one is available. Without that primitive the page still
//! shows the preview; it just exchanges no cross-tab signals.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use periscope_core::{SandboxPolicy, EMBED_PERMISSIONS};

const CSS: &str = r#"
html, body { margin: 0; height: 100%; }
.preview-root { position: relative; width: 100%; height: 100%; }
.preview-root iframe { width: 100%; height: 100%; border: none; }
.preview-loading {
    position: absolute; inset: 0;
    display: flex; align-items: center; justify-content: center;
    background: #0a0e1a; color: #e2e8f0;
    font-family: system-ui, sans-serif; text-align: center;
}
.loading-title { font-size: 1.125rem; font-weight: 500; margin-bottom: 0.5rem; }
.loading-subtitle { font-size: 0.875rem; color: #94a3b8; }
"#;

pub fn preview_shell(session_id: &str, address: &str, channel: &str) -> Markup {
    let sandbox = SandboxPolicy::default();

    html! {
        (DOCTYPE)
        html {
            head {
                title { "Preview" }
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                style { (PreEscaped(CSS)) }
            }
            body {
                div class="preview-root" {
                    div class="preview-loading" id="preview-loading" {
                        div {
                            div class="loading-title" { "Loading preview..." }
                            div class="loading-subtitle" { "Preview ID: " (session_id) }
                        }
                    }
                    iframe
                        id="preview-frame"
                        title="Sandbox Preview"
                        src=(address)
                        sandbox=(sandbox.attribute())
                        allow=(EMBED_PERMISSIONS)
                        loading="eager" {}
                }
                script { (PreEscaped(sync_script(session_id, address, channel))) }
            }
        }
    }
}

/// Client-side mirror of the synchronization protocol: announce readiness,
/// force-reload on refresh and file-change signals for this session.
fn sync_script(session_id: &str, address: &str, channel: &str) -> String {
    let session_json = serde_json::to_string(session_id).unwrap_or_else(|_| "\"\"".to_string());
    let address_json = serde_json::to_string(address).unwrap_or_else(|_| "\"\"".to_string());
    let channel_json = serde_json::to_string(channel).unwrap_or_else(|_| "\"\"".to_string());

    format!(
        r#"(() => {{
  const sessionId = {session_json};
  const address = {address_json};
  const frame = document.getElementById('preview-frame');
  const overlay = document.getElementById('preview-loading');
  frame.addEventListener('load', () => {{ overlay.style.display = 'none'; }});

  if (typeof BroadcastChannel !== 'function') {{
    return;
  }}

  const channel = new BroadcastChannel({channel_json});
  const announce = () => channel.postMessage({{
    kind: 'preview-ready', sessionId, address, timestamp: Date.now(),
  }});

  channel.onmessage = (event) => {{
    const message = event.data;
    if (!message || message.sessionId !== sessionId) {{
      return;
    }}
    if (message.kind === 'refresh-preview' || message.kind === 'file-change') {{
      frame.src = '';
      requestAnimationFrame(() => {{ frame.src = address; }});
    }}
  }};

  frame.addEventListener('load', announce);
  announce();
}})();"#
    )
}
