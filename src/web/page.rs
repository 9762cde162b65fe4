use serde::Serialize;

use crate::data::filter::Selection;
use crate::data::options::DimensionOptions;

pub const TITLE: &str = "경제활동인구조사 (월별 통계)";

/// Data the page needs before its first request: the selector lists and the
/// initial selection.
#[derive(Debug, Serialize)]
pub struct Bootstrap<'a> {
    #[serde(flatten)]
    pub options: &'a DimensionOptions,
    pub default_selection: Selection,
}

impl<'a> Bootstrap<'a> {
    pub fn new(options: &'a DimensionOptions) -> Self {
        Bootstrap {
            options,
            default_selection: options.default_selection(),
        }
    }
}

/// Render the dashboard page with the bootstrap data inlined.
pub fn render(bootstrap: &Bootstrap<'_>) -> serde_json::Result<String> {
    // `</` would end the surrounding <script> element early.
    let json = serde_json::to_string(bootstrap)?.replace("</", "<\\/");
    Ok(TEMPLATE
        .replace("{{TITLE}}", TITLE)
        .replace("{{BOOTSTRAP}}", &json))
}

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="ko">
<head>
<meta charset="utf-8">
<title>{{TITLE}}</title>
<script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
<style>
  body { font-family: sans-serif; margin: 1.5rem; }
  h3 { text-align: center; }
  .row { display: flex; gap: 0.5rem; margin-bottom: 0.5rem; }
  .row select { width: 100%; padding: 0.3rem; }
  #error { color: #c00; min-height: 1.2em; }
</style>
</head>
<body>
<h3>{{TITLE}}</h3>
<div class="row">
  <select id="itm_dropdown"></select>
  <select id="sex_dropdown"></select>
</div>
<div class="row">
  <select id="age_dropdown"></select>
  <select id="year_dropdown" multiple size="4"></select>
</div>
<div id="error"></div>
<div id="graph"></div>
<script id="bootstrap" type="application/json">{{BOOTSTRAP}}</script>
<script>
const boot = JSON.parse(document.getElementById("bootstrap").textContent);
const controls = {
  item: document.getElementById("itm_dropdown"),
  sex: document.getElementById("sex_dropdown"),
  age: document.getElementById("age_dropdown"),
  years: document.getElementById("year_dropdown"),
};

function fill(select, entries, selected) {
  for (const entry of entries) {
    const opt = document.createElement("option");
    opt.value = String(entry.value);
    opt.textContent = entry.label;
    opt.selected = selected.includes(String(entry.value));
    select.appendChild(opt);
  }
}

const init = boot.default_selection;
fill(controls.item, boot.items, [init.item_id]);
fill(controls.sex, boot.sexes, [String(init.sex_code)]);
fill(controls.age, boot.ages, [String(init.age_code)]);
fill(controls.years, boot.years, init.years);

let years = init.years.slice();

function currentSelection() {
  const picked = Array.from(controls.years.options).filter(o => o.selected).map(o => o.value);
  // Keep the user's pick order: surviving years first, new ones appended.
  years = years.filter(y => picked.includes(y)).concat(picked.filter(y => !years.includes(y)));
  return {
    item_id: controls.item.value,
    sex_code: parseInt(controls.sex.value, 10),
    age_code: parseInt(controls.age.value, 10),
    years: years,
  };
}

async function redraw() {
  const selection = currentSelection();
  const error = document.getElementById("error");
  if (selection.years.length === 0) {
    error.textContent = "연도를 하나 이상 선택하세요.";
    return;
  }
  const resp = await fetch("/api/figure", {
    method: "POST",
    headers: { "Content-Type": "application/json" },
    body: JSON.stringify(selection),
  });
  const body = await resp.json();
  if (!resp.ok) {
    error.textContent = body.error || resp.statusText;
    return;
  }
  error.textContent = "";
  Plotly.react("graph", body.data, body.layout);
}

for (const control of Object.values(controls)) {
  control.addEventListener("change", redraw);
}
redraw();
</script>
</body>
</html>
"#;
