//! Dashboard HTML page handler for the quote board.
//!
//! Serves a self-contained page with inline CSS/JS: a random-quote viewer
//! with category filter, the add-quote form, import/export controls and the
//! current collection, all wired to the RPC API.

use crate::routes::AppState;
use crate::store;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use std::sync::Arc;

pub async fn dashboard(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (quotes, categories) = {
        let store = state.store.lock().await;
        (store.all().to_vec(), store::categories(store.all()))
    };
    let selected = state
        .db
        .load_selected_category()
        .ok()
        .flatten()
        .unwrap_or_else(|| store::ALL_CATEGORY.to_string());
    let notification = state.notification.lock().await.clone().unwrap_or_default();
    let last_sync = state
        .last_sync_at
        .lock()
        .await
        .clone()
        .unwrap_or_else(|| "never".to_string());
    let uptime = state.start_time.elapsed().as_secs();

    let stats_html = format!(
        r#"<div class="stats">
            <div class="stat"><span class="val">{}</span><span class="lbl">Quotes</span></div>
            <div class="stat green"><span class="val">{}</span><span class="lbl">Categories</span></div>
            <div class="stat yellow"><span class="val">{}s</span><span class="lbl">Sync Interval</span></div>
        </div>"#,
        quotes.len(),
        categories.len() - 1,
        state.sync_interval_secs
    );

    let mut option_tags = String::new();
    for category in &categories {
        let selected_attr = if *category == selected { " selected" } else { "" };
        option_tags.push_str(&format!(
            "<option value=\"{0}\"{1}>{0}</option>\n",
            escape_html(category),
            selected_attr
        ));
    }

    let mut quote_rows = String::new();
    for quote in &quotes {
        quote_rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            escape_html(&quote.text),
            escape_html(&quote.category)
        ));
    }
    if quote_rows.is_empty() {
        quote_rows = "<tr><td colspan=\"2\">No quotes stored.</td></tr>".to_string();
    }

    let uptime_str = format_uptime(uptime);

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Quote Board</title>
<style>
  * {{ margin: 0; padding: 0; box-sizing: border-box; }}
  body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #0f1117; color: #e0e0e0; padding: 20px; }}
  h1 {{ color: #7289da; margin-bottom: 8px; }}
  .meta {{ color: #8b949e; font-size: 0.85em; margin-bottom: 20px; }}
  .stats {{ display: flex; gap: 16px; margin-bottom: 24px; flex-wrap: wrap; }}
  .stat {{ background: #161b22; border: 1px solid #30363d; border-radius: 8px; padding: 16px 24px; text-align: center; min-width: 140px; }}
  .stat .val {{ display: block; font-size: 2em; font-weight: bold; color: #7289da; }}
  .stat.green .val {{ color: #3fb950; }}
  .stat.yellow .val {{ color: #d29922; }}
  .stat .lbl {{ display: block; font-size: 0.85em; color: #8b949e; margin-top: 4px; }}
  .viewer {{ background: #161b22; border: 1px solid #30363d; border-radius: 8px; padding: 24px; margin-bottom: 24px; }}
  #quoteDisplay {{ font-size: 1.3em; min-height: 2em; margin-bottom: 16px; }}
  #notification {{ color: #3fb950; font-size: 0.9em; min-height: 1.2em; margin-top: 12px; }}
  .controls {{ display: flex; gap: 8px; flex-wrap: wrap; align-items: center; }}
  button {{ background: #21262d; border: 1px solid #30363d; color: #e0e0e0; padding: 8px 14px; border-radius: 6px; cursor: pointer; }}
  button:hover {{ background: #30363d; }}
  select, input {{ background: #0f1117; border: 1px solid #30363d; color: #e0e0e0; padding: 8px; border-radius: 6px; }}
  table {{ width: 100%; border-collapse: collapse; margin-bottom: 24px; }}
  th {{ background: #161b22; color: #8b949e; text-align: left; padding: 8px 12px; font-size: 0.85em; text-transform: uppercase; border-bottom: 1px solid #30363d; }}
  td {{ padding: 8px 12px; border-bottom: 1px solid #21262d; font-size: 0.9em; }}
  tr:hover {{ background: #161b22; }}
  h2 {{ color: #c9d1d9; margin-bottom: 12px; font-size: 1.1em; }}
  .section {{ margin-bottom: 28px; }}
  #addQuoteForm {{ display: flex; gap: 8px; flex-wrap: wrap; margin-top: 16px; }}
</style>
</head>
<body>
  <h1>Quote Board</h1>
  <p class="meta">Uptime: {uptime_str} &middot; Last sync: {last_sync}</p>

  {stats_html}

  <div class="viewer">
    <div id="quoteDisplay"></div>
    <div class="controls">
      <button id="newQuote">Show New Quote</button>
      <select id="categoryFilter">{option_tags}</select>
      <button id="exportQuotes">Export Quotes</button>
      <input type="file" id="importQuotes" accept=".json">
    </div>
    <div id="addQuoteForm"></div>
    <div id="notification">{notification}</div>
  </div>

  <div class="section">
    <h2>All Quotes</h2>
    <table>
      <thead><tr><th>Text</th><th>Category</th></tr></thead>
      <tbody>{quote_rows}</tbody>
    </table>
  </div>

  <script>{script}</script>
</body>
</html>"#,
        uptime_str = uptime_str,
        last_sync = escape_html(&last_sync),
        stats_html = stats_html,
        option_tags = option_tags,
        notification = escape_html(&notification),
        quote_rows = quote_rows,
        script = DASHBOARD_JS,
    );

    ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], html)
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn format_uptime(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

const DASHBOARD_JS: &str = r#"
const quoteDisplay = document.getElementById('quoteDisplay');
const notification = document.getElementById('notification');
const categoryFilter = document.getElementById('categoryFilter');

async function rpc(path, body) {
  const opts = body === undefined
    ? undefined
    : { method: 'POST', headers: { 'Content-Type': 'application/json' }, body: JSON.stringify(body) };
  const res = await fetch(path, opts);
  return res.json();
}

function renderQuote(quote) {
  quoteDisplay.textContent = '"' + quote.text + '" - ' + quote.category;
}

async function loadCategories() {
  const cats = await rpc('/rpc/categories');
  const sel = await rpc('/rpc/categories/selected');
  categoryFilter.innerHTML = '';
  for (const c of (cats.data || ['all'])) {
    const option = document.createElement('option');
    option.value = c;
    option.textContent = c;
    categoryFilter.appendChild(option);
  }
  if (sel.data) categoryFilter.value = sel.data;
}

async function showRandomQuote() {
  const res = await rpc('/rpc/quotes/random', { category: categoryFilter.value });
  // An empty filtered subset returns no quote; the display stays as it is.
  if (res.data) renderQuote(res.data);
}

function createAddQuoteForm() {
  const container = document.getElementById('addQuoteForm');

  const textInput = document.createElement('input');
  textInput.id = 'newQuoteText';
  textInput.placeholder = 'Enter a new quote';

  const categoryInput = document.createElement('input');
  categoryInput.id = 'newQuoteCategory';
  categoryInput.placeholder = 'Enter quote category';

  const addButton = document.createElement('button');
  addButton.textContent = 'Add Quote';
  addButton.onclick = addQuote;

  container.appendChild(textInput);
  container.appendChild(categoryInput);
  container.appendChild(addButton);
}

async function addQuote() {
  const text = document.getElementById('newQuoteText').value;
  const category = document.getElementById('newQuoteCategory').value;
  const res = await rpc('/rpc/quotes/add', { text: text, category: category });
  if (res.data) {
    renderQuote({ text: text, category: category });
    await loadCategories();
  }
}

async function importQuotes(event) {
  const file = event.target.files[0];
  if (!file) return;
  const body = await file.text();
  const res = await fetch('/rpc/quotes/import', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: body
  });
  const json = await res.json();
  if (json.success) {
    notification.textContent = 'Quotes imported successfully.';
    await loadCategories();
  }
}

async function refreshNotification() {
  const res = await rpc('/rpc/status');
  if (res.data && res.data.notification) notification.textContent = res.data.notification;
}

document.getElementById('newQuote').onclick = showRandomQuote;
document.getElementById('exportQuotes').onclick = () => { location.href = '/rpc/quotes/export'; };
document.getElementById('importQuotes').onchange = importQuotes;
categoryFilter.onchange = async () => {
  await rpc('/rpc/categories/select', { category: categoryFilter.value });
  await showRandomQuote();
};

createAddQuoteForm();
loadCategories().then(showRandomQuote);
setInterval(refreshNotification, 30000);
"#;
