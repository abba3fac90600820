use crate::data::Catalogs;
use crate::server::api::{self, ApiError};

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}

/// Path with the query string stripped, for route matching.
fn route_path(path: &str) -> &str {
    path.split('?').next().unwrap_or(path)
}

pub fn route_request(catalogs: &Catalogs, method: &str, path: &str) -> HttpResponse {
    match (method, route_path(path)) {
        ("GET", "/") => HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "text/html; charset=utf-8",
            body: index_html(),
        },
        ("GET", "/api/health") => json_result(api::health_payload()),
        ("GET", "/api/medals") => json_result(api::medals_payload(catalogs)),
        ("GET", "/api/accessories") => json_result(api::accessories_payload(catalogs)),
        ("GET", "/api/materials") => json_result(api::materials_payload(catalogs)),
        ("GET", "/api/data/version") => json_result(api::data_version_payload(catalogs)),
        ("GET", route) if route.starts_with("/api/medals/") && route.ends_with("/score") => {
            json_result(api::medal_score_payload(catalogs, path))
        }
        ("GET", route)
            if route.starts_with("/api/accessories/") && route.ends_with("/components") =>
        {
            json_result(api::components_payload(catalogs, path))
        }
        ("GET", route) if route.starts_with("/api/accessories/") && route.ends_with("/craft") => {
            json_result(api::craft_payload(catalogs, path))
        }
        _ => error_response(404, "Not Found", "Route not found"),
    }
}

fn json_result(result: Result<String, ApiError>) -> HttpResponse {
    match result {
        Ok(body) => HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "application/json",
            body,
        },
        Err(ApiError::BadRequest(message)) => error_response(400, "Bad Request", &message),
        Err(ApiError::NotFound(message)) => error_response(404, "Not Found", &message),
        Err(ApiError::Internal(message)) => {
            error_response(500, "Internal Server Error", &message)
        }
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}

fn index_html() -> String {
    r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>darkroad console</title>
  <style>
    body { font-family: Arial, sans-serif; max-width: 760px; margin: 24px auto; padding: 0 12px; }
    .card { border: 1px solid #ddd; border-radius: 8px; padding: 14px; margin: 14px 0; }
    label { display: block; margin: 8px 0 4px; font-weight: 600; }
    input { width: 100px; padding: 6px; }
    button { margin-top: 10px; padding: 6px 12px; }
    pre { background: #111; color: #aef2ae; padding: 12px; overflow: auto; border-radius: 6px; min-height: 160px; }
  </style>
</head>
<body>
  <h1>darkroad local API</h1>

  <div class="card">
    <strong>Medal score</strong>
    <label for="medal-id">Medal id</label>
    <input id="medal-id" type="number" min="1" value="1" />
    <div>
      <label><input type="checkbox" id="opt-general" style="width:auto" /> general attack up</label>
      <label><input type="checkbox" id="opt-attribute" style="width:auto" /> attribute attack up</label>
      <label><input type="checkbox" id="opt-supernova" style="width:auto" /> supernova</label>
    </div>
    <button id="score-btn">GET /api/medals/{id}/score</button>
  </div>

  <div class="card">
    <strong>Crafting cost</strong>
    <label for="accessory-id">Accessory id</label>
    <input id="accessory-id" type="number" min="1" value="1" />
    <button id="craft-btn">GET /api/accessories/{id}/craft</button>
  </div>

  <pre id="output">Ready.</pre>

  <script>
    const output = document.getElementById('output');
    async function request(path) {
      output.textContent = 'Loading…';
      const response = await fetch(path);
      output.textContent = 'HTTP ' + response.status + '\n' + await response.text();
    }
    document.getElementById('score-btn').addEventListener('click', () => {
      const id = document.getElementById('medal-id').value;
      const flags = [];
      if (document.getElementById('opt-general').checked) flags.push('general=1');
      if (document.getElementById('opt-attribute').checked) flags.push('attribute=1');
      if (document.getElementById('opt-supernova').checked) flags.push('supernova=1');
      request('/api/medals/' + id + '/score' + (flags.length ? '?' + flags.join('&') : ''));
    });
    document.getElementById('craft-btn').addEventListener('click', () => {
      request('/api/accessories/' + document.getElementById('accessory-id').value + '/craft');
    });
  </script>
</body>
</html>
"#
    .to_string()
}
