use axum::response::{Html, IntoResponse};

/// Method, path and a one-line description for each public endpoint
pub const ENDPOINTS: &[(&str, &str, &str)] = &[
    ("GET", "/", "Returns this instruction manual"),
    ("GET", "/health", "Service status and dataset size"),
    (
        "GET",
        "/heatpump/share",
        "Time-resolved heat pump share (location, resolution=hourly|daily|monthly)",
    ),
    (
        "GET",
        "/heatpump/summary",
        "Average, max and min heat pump share (location)",
    ),
    (
        "GET",
        "/heatpump/plot",
        "PNG plot of total vs heat pump consumption (location)",
    ),
    (
        "GET",
        "/heatpump/report",
        "CSV report with detailed data (location)",
    ),
    (
        "GET",
        "/locations",
        "All unique locations with their town (optional Town filter)",
    ),
];

pub const MANUAL_HTML: &str = r#"<html>
  <head>
    <title>Heat Pump Contribution API Manual</title>
    <style>
      body {font-family: Arial, sans-serif; margin: 20px; line-height: 1.6;}
      h1 {color: #2c3e50;}
      h2 {color: #34495e;}
      code {background-color: #ecf0f1; padding: 2px 4px; border-radius: 4px;}
      pre {background-color: #ecf0f1; padding: 10px; border-radius: 4px; overflow-x: auto;}
    </style>
  </head>
  <body>
    <h1>Heat Pump Contribution API</h1>
    <p>Analysis of heat pump energy consumption relative to total facility energy usage.</p>
    <h2>Endpoints</h2>
    <ul>
      <li><strong>GET /</strong>: Returns this instruction manual.</li>
      <li><strong>GET /health</strong>: Service status and the number of readings and locations loaded.</li>
      <li>
        <strong>GET /heatpump/share</strong>: Time-resolved heat pump share data.
        <ul>
          <li><code>location</code> (required): The location name or ID.</li>
          <li><code>resolution</code> (optional): <code>hourly</code>, <code>daily</code> or <code>monthly</code> (default: daily).</li>
        </ul>
      </li>
      <li>
        <strong>GET /heatpump/summary</strong>: Average, max and min heat pump percentages for a location.
        <ul><li><code>location</code> (required): The location name or ID.</li></ul>
      </li>
      <li>
        <strong>GET /heatpump/plot</strong>: PNG plot comparing total consumption (blue) with heat pump consumption (orange).
        <ul><li><code>location</code> (required): The location name or ID.</li></ul>
      </li>
      <li>
        <strong>GET /heatpump/report</strong>: Downloads a CSV report with detailed data for a location.
        <ul><li><code>location</code> (required): The location name or ID.</li></ul>
      </li>
      <li>
        <strong>GET /locations</strong>: All unique locations and their towns.
        <ul><li><code>Town</code> (optional): Case-insensitive filter on the town name.</li></ul>
      </li>
    </ul>
    <h2>How to Use</h2>
    <pre>GET /heatpump/share?location=tregattu%2011&amp;resolution=daily</pre>
    <pre>GET /heatpump/report?location=tregattu%2011</pre>
    <pre>GET /locations?Town=SomeTown</pre>
    <p>Interactive API documentation is available at <code>/docs</code> when the service is built with the <code>swagger</code> feature.</p>
  </body>
</html>
"#;

/// GET / - HTML user manual
pub async fn root() -> impl IntoResponse {
    tracing::info!("Root endpoint accessed");
    Html(MANUAL_HTML)
}
