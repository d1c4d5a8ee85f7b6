use crate::icons::{Glyph, IconSet, IconTheme};
use crate::journey::CriterionStatus;
use crate::models::{PhaseStatus, ProgrammingSlot};
use crate::view::{CriterionRow, DashboardView, FormSpec, PhaseCard, StatusKind, StatusMessage, METRIC_FIELD_PREFIX};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum NavPage {
    Dashboard,
    Clinician,
    Icons,
    Protocol,
}

pub fn render_dashboard_page(view: &DashboardView, client_id: &str, icons: &dyn IconSet) -> String {
    let mut body = format!(
        r#"<div class="header">
  <div class="header-brand"><h1>VECTOR</h1><div class="subtitle">Trajectory Dashboard</div></div>
  <div class="header-client">
    <div class="client-name">{name}</div>
    <div class="client-meta">{pathology} — {sport}</div>
  </div>
</div>
"#,
        name = escape(&view.client.name),
        pathology = escape(&view.client.pathology),
        sport = escape(&view.client.sport),
    );

    let objective = &view.objective;
    body.push_str(&format!(
        r#"<div class="pike">
  <div class="pike-icon">{icon}</div>
  <div class="pike-label">THE PIKE — TERMINAL OBJECTIVE</div>
  <div class="pike-goal">{goal}</div>
  <div class="pike-sport">{pathology} → {sport}</div>
  <div class="pike-source">
    Protocol Source: {source}<br>
    <a href="{doi_url}" target="_blank" rel="noopener noreferrer" class="doi-link">DOI: {doi}</a>
    <a class="view-source-btn" href="/protocol/{protocol_id}">View Source Protocol</a>
  </div>
</div>
"#,
        icon = icons.glyph(Glyph::Target),
        goal = escape(&objective.goal),
        pathology = escape(&objective.pathology),
        sport = escape(&objective.sport),
        source = escape(&objective.research_source),
        doi_url = escape(&objective.doi_url),
        doi = escape(&objective.research_doi),
        protocol_id = url_part(&objective.protocol_id),
    ));

    for card in &view.phases {
        body.push_str(&format!(
            "<div class=\"vector-line {}\"><div class=\"line\"></div></div>\n",
            card.connector
        ));
        body.push_str(&render_phase_card(card, client_id, icons));
    }

    body.push_str(&format!(
        "<div class=\"footer\"><span>Started: {}</span><span>Next Session: {}</span></div>\n",
        escape(&view.footer.started),
        escape(&view.footer.next_session),
    ));
    body.push_str(TOGGLE_SCRIPT);

    render_page("VECTOR — Trajectory", NavPage::Dashboard, &body)
}

fn render_phase_card(card: &PhaseCard, client_id: &str, icons: &dyn IconSet) -> String {
    let icon = match card.status {
        PhaseStatus::Completed => icons.glyph(Glyph::Check),
        PhaseStatus::Active => icons.glyph(Glyph::Active),
        PhaseStatus::Locked => icons.glyph(Glyph::Lock),
    };
    let expanded = if card.expanded { " expanded" } else { "" };

    let criteria: String = card
        .criteria
        .iter()
        .map(|row| render_criterion(row, icons))
        .collect();

    let programming = match &card.programming {
        Some(slots) => format!(
            "<div class=\"programming-section\"><div class=\"criteria-section-title\">Your Programming</div>{}</div>",
            render_programming(slots, icons)
        ),
        None => String::new(),
    };

    format!(
        r#"<div class="phase-card {status}{expanded}" data-phase="{index}" id="{element_id}">
  <a class="phase-header" href="/?client={client}&amp;open={index}" role="button" aria-expanded="{aria}">
    <span class="phase-icon">{icon}</span>
    <span class="phase-title">{name}</span>
    <span class="phase-badge {badge_class}">{badge}</span>
  </a>
  <div class="phase-body">
    <div class="phase-description">{description} <span class="muted">— {duration}</span></div>
    <div class="criteria-section-title">Exit Criteria — The Gate</div>
    {criteria}
    {programming}
  </div>
</div>
"#,
        status = card.status.as_str(),
        index = card.index,
        element_id = card.element_id,
        client = url_part(client_id),
        aria = card.expanded,
        name = escape(&card.name),
        badge_class = card.badge.kind.css_class(),
        badge = escape(&card.badge.text),
        description = escape(&card.description),
        duration = escape(&card.typical_duration),
    )
}

fn render_criterion(row: &CriterionRow, icons: &dyn IconSet) -> String {
    let glyph = match row.status {
        CriterionStatus::Met => Glyph::Check,
        CriterionStatus::Pending => Glyph::Pending,
        CriterionStatus::Locked => Glyph::LockedCrit,
    };
    format!(
        "<div class=\"criterion\"><span class=\"criterion-status\">{}</span><span class=\"criterion-label\">{}</span><span class=\"criterion-value {}\">{}</span></div>",
        icons.glyph(glyph),
        escape(&row.label),
        row.status.as_str(),
        escape(&row.display_value),
    )
}

fn render_programming(slots: &[ProgrammingSlot], icons: &dyn IconSet) -> String {
    if slots.is_empty() {
        return "<div class=\"slot-detail\">No programming assigned.</div>".to_string();
    }

    slots
        .iter()
        .map(|slot| {
            let hd = match slot.hd.as_deref().filter(|text| !text.is_empty()) {
                Some(text) => format!(
                    "<span class=\"slot-hd-badge\">{}{}</span>",
                    icons.glyph(Glyph::HdBadge),
                    escape(text)
                ),
                None => String::new(),
            };
            let intent = optional_line("slot-intent", "Intent", slot.intent.as_deref());
            let rationale = optional_line("slot-rationale", "Audit Rationale", slot.rationale.as_deref());
            format!(
                "<div class=\"programming-slot\"><span class=\"slot-type\">{}</span><div><span class=\"slot-exercise\">{}{}</span><div class=\"slot-detail\">{}{}<div class=\"slot-guidance\">{}</div></div></div></div>",
                escape(&slot.slot_type),
                escape(&slot.exercise),
                hd,
                intent,
                rationale,
                escape(&slot.detail),
            )
        })
        .collect()
}

fn optional_line(class: &str, title: &str, text: Option<&str>) -> String {
    match text.filter(|text| !text.is_empty()) {
        Some(text) => format!("<div class=\"{class}\"><strong>{title}:</strong> {}</div>", escape(text)),
        None => String::new(),
    }
}

pub fn render_clinician_page(
    client_id: &str,
    form: Option<&FormSpec>,
    status: Option<&StatusMessage>,
    icons: &dyn IconSet,
) -> String {
    let mut body = format!(
        r#"<div class="header"><div class="header-brand"><h1>{icon} Clinician Portal</h1><div class="subtitle">Record phase exit metrics</div></div></div>
<form class="lookup" method="get" action="/clinician">
  <label for="clientId">Client ID</label>
  <input type="text" id="clientId" name="client" value="{client}" required>
  <button type="submit" id="loadCriteria">Load Criteria</button>
</form>
"#,
        icon = icons.glyph(Glyph::Clinician),
        client = escape(client_id),
    );

    if let Some(status) = status {
        let class = match status.kind {
            StatusKind::Success => "success",
            StatusKind::Error => "error",
        };
        body.push_str(&format!(
            "<div id=\"status\" class=\"status-msg {class}\">{}",
            escape(&status.text)
        ));
        if status.kind == StatusKind::Success {
            body.push_str(&format!(
                " <a href=\"/?client={}\">View Updated Dashboard &rarr;</a>",
                url_part(client_id)
            ));
        }
        body.push_str("</div>\n");
    }

    if let Some(form) = form {
        body.push_str(&render_criteria_form(client_id, form, icons));
    }

    render_page("VECTOR — Clinician Portal", NavPage::Clinician, &body)
}

fn render_criteria_form(client_id: &str, form: &FormSpec, icons: &dyn IconSet) -> String {
    let fields: String = form
        .fields
        .iter()
        .map(|field| {
            let placeholder = if field.placeholder.is_empty() {
                String::new()
            } else {
                format!(" placeholder=\"e.g., {}\"", escape(&field.placeholder))
            };
            format!(
                r#"<div class="criteria-group">
  <label for="{id}">{label}</label>
  <div class="criteria-input">
    <input type="number" step="0.1" id="{id}" name="{prefix}{metric}" class="metric-input" data-metric="{metric}"{placeholder} aria-describedby="{help_id}">
    <span class="muted">{unit}</span>
  </div>
  <div id="{help_id}" class="help-text">{help}</div>
</div>
"#,
                id = escape(&field.input_id),
                label = escape(&field.display_label),
                prefix = METRIC_FIELD_PREFIX,
                metric = escape(&field.metric_name),
                help_id = escape(&field.help_id),
                unit = escape(&field.unit),
                help = escape(&field.help_text),
            )
        })
        .collect();

    format!(
        r#"<form id="criteriaForm" method="post" action="/clinician/record">
  <input type="hidden" name="client_id" value="{client}">
  <div class="client-card">
    <div class="client-name">{name}</div>
    <div class="muted">{pathology} — {phase}</div>
  </div>
  {fields}
  <button type="submit" id="submitMetrics">{icon} Record Metrics</button>
</form>
"#,
        client = escape(client_id),
        name = escape(&form.client_name),
        pathology = escape(&form.pathology),
        phase = escape(&form.phase_name),
        icon = icons.glyph(Glyph::Record),
    )
}

/// `content_html` is already-rendered markdown; errors are plain text.
pub fn render_protocol_page(protocol_id: &str, content_html: Result<&str, &str>) -> String {
    let content = match content_html {
        Ok(html) => format!("<div id=\"protocol-content\" class=\"protocol-content\">{html}</div>"),
        Err(message) => format!(
            "<div class=\"error-state\"><strong>Error Loading Document</strong><br>Could not retrieve the protocol from secure storage.<br>{}</div>",
            escape(message)
        ),
    };

    let body = format!(
        r#"<div class="modal-content" data-current-protocol="{id}">
  <div class="header"><div class="header-brand"><h1>Source Protocol</h1><div class="subtitle">{id}</div></div></div>
  {content}
  <form class="modal-footer" method="post" action="/protocol/{path}/flag">
    <label for="reason">Report an issue</label>
    <input type="text" id="reason" name="reason" placeholder="Broken link, outdated info" required>
    <button type="submit" class="report-btn">Report Issue</button>
  </form>
</div>
"#,
        id = escape(protocol_id),
        path = url_part(protocol_id),
    );

    render_page("VECTOR — Source Protocol", NavPage::Protocol, &body)
}

pub fn render_flag_confirmation(protocol_id: &str) -> String {
    let body = format!(
        "<div class=\"status-msg success\">Issue reported. The system admin will review protocol {}. <a href=\"/protocol/{}\">Back to protocol</a></div>",
        escape(protocol_id),
        url_part(protocol_id),
    );
    render_page("VECTOR — Issue Reported", NavPage::Protocol, &body)
}

pub fn render_icon_preview() -> String {
    let mut body = String::from("<div class=\"header\"><div class=\"header-brand\"><h1>Icon Preview</h1></div></div>\n");
    for theme in IconTheme::ALL {
        let set = theme.icon_set();
        body.push_str(&format!(
            "<section class=\"icon-theme\" id=\"theme-{0}\"><h2>{0}</h2><div class=\"icon-grid\">",
            set.name()
        ));
        for glyph in Glyph::ALL {
            body.push_str(&format!(
                "<figure class=\"icon-cell\">{}<figcaption>{}</figcaption></figure>",
                set.glyph(glyph),
                glyph.key()
            ));
        }
        body.push_str("</div></section>\n");
    }
    render_page("VECTOR — Icon Preview", NavPage::Icons, &body)
}

pub fn render_error_page(message: &str) -> String {
    let body = format!("<div class=\"error-state\">{}</div>", escape(message));
    render_page("VECTOR", NavPage::Dashboard, &body)
}

fn render_page(title: &str, current: NavPage, body: &str) -> String {
    PAGE_HTML
        .replace("{{TITLE}}", &escape(title))
        .replace("{{NAV}}", &render_nav(current))
        .replace("{{BODY}}", body)
}

fn render_nav(current: NavPage) -> String {
    [
        (NavPage::Dashboard, "/", "Dashboard"),
        (NavPage::Clinician, "/clinician", "Clinician Portal"),
        (NavPage::Icons, "/icons", "Icon Preview"),
    ]
    .iter()
    .map(|(page, href, label)| {
        if *page == current {
            format!("<a href=\"{href}\" class=\"nav-link active\" aria-current=\"page\">{label}</a>")
        } else {
            format!("<a href=\"{href}\" class=\"nav-link\">{label}</a>")
        }
    })
    .collect()
}

/// Percent-encodes one path segment or query value, then escapes it for an attribute.
fn url_part(value: &str) -> String {
    escape(&urlencoding::encode(value))
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const TOGGLE_SCRIPT: &str = r#"<script>
  document.querySelectorAll('.phase-header').forEach((header) => {
    header.addEventListener('click', (event) => {
      event.preventDefault();
      const card = header.parentElement;
      if (!card || card.classList.contains('active')) return;
      const open = card.classList.toggle('expanded');
      header.setAttribute('aria-expanded', String(open));
    });
  });
</script>
"#;

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <meta http-equiv="Content-Security-Policy" content="default-src 'self'; style-src 'self' 'unsafe-inline'; script-src 'self' 'unsafe-inline'" />
  <title>{{TITLE}}</title>
  <style>
    :root {
      --bg: #0d1117;
      --panel: #161b22;
      --text-primary: #e6edf3;
      --text-muted: #8b949e;
      --accent-primary: #3fb950;
      --accent-active: #58a6ff;
      --accent-danger: #f85149;
      --border: rgba(240, 246, 252, 0.1);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--text-primary);
      font-family: "Inter", "Segoe UI", sans-serif;
    }

    .global-nav nav {
      display: flex;
      gap: 18px;
      padding: 14px 24px;
      border-bottom: 1px solid var(--border);
    }

    .nav-link {
      color: var(--text-muted);
      text-decoration: none;
    }

    .nav-link.active {
      color: var(--text-primary);
      font-weight: 600;
    }

    main {
      width: min(880px, 100%);
      margin: 0 auto;
      padding: 28px 18px 48px;
      display: grid;
      gap: 12px;
    }

    .header {
      display: flex;
      justify-content: space-between;
      align-items: flex-end;
    }

    h1 {
      margin: 0;
      letter-spacing: 0.2em;
    }

    .subtitle, .muted, .client-meta, .help-text {
      color: var(--text-muted);
    }

    .icon {
      width: 20px;
      height: 20px;
      fill: none;
      stroke: currentColor;
      stroke-linecap: round;
      stroke-linejoin: round;
    }

    .icon-lg {
      width: 36px;
      height: 36px;
    }

    .icon-sm {
      width: 16px;
      height: 16px;
    }

    .pike, .phase-card, .client-card, form {
      background: var(--panel);
      border: 1px solid var(--border);
      border-radius: 12px;
      padding: 18px;
    }

    .pike-goal {
      font-size: 1.4rem;
      font-weight: 600;
      margin: 8px 0;
    }

    .vector-line .line {
      width: 2px;
      height: 22px;
      margin: 0 auto;
      background: var(--accent-active);
    }

    .vector-line.completed .line {
      background: var(--accent-primary);
    }

    .vector-line.locked .line {
      background: var(--border);
    }

    .phase-header {
      display: flex;
      align-items: center;
      gap: 12px;
      color: inherit;
      text-decoration: none;
      cursor: pointer;
    }

    .phase-title {
      flex: 1;
      font-weight: 600;
    }

    .phase-body {
      display: none;
      margin-top: 14px;
    }

    .phase-card.active .phase-body, .phase-card.expanded .phase-body {
      display: block;
    }

    .phase-card.locked {
      opacity: 0.7;
    }

    .active-badge {
      color: var(--accent-active);
    }

    .completed-badge {
      color: var(--accent-primary);
    }

    .locked-badge {
      color: var(--text-muted);
    }

    .criterion, .programming-slot {
      display: flex;
      gap: 10px;
      align-items: center;
      padding: 6px 0;
    }

    .criterion-label {
      flex: 1;
    }

    .criterion-value.met {
      color: var(--accent-primary);
    }

    .criterion-value.locked {
      color: var(--text-muted);
    }

    .criteria-section-title {
      margin-top: 14px;
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: var(--text-muted);
    }

    .footer {
      display: flex;
      justify-content: space-between;
      color: var(--text-muted);
      font-size: 0.9rem;
    }

    .status-msg.success {
      color: var(--accent-primary);
    }

    .status-msg.error, .error-state {
      color: var(--accent-danger);
    }

    .icon-grid {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(110px, 1fr));
      gap: 12px;
    }

    .icon-cell {
      margin: 0;
      text-align: center;
    }
  </style>
</head>
<body>
  <header class="global-nav"><nav>{{NAV}}</nav></header>
  <main id="app">
{{BODY}}
  </main>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::Kinetic;
    use crate::view::FormField;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape(r#"<b>"A&B"</b>"#), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
    }

    #[test]
    fn clinician_page_names_inputs_by_metric() {
        let form = FormSpec {
            client_name: "Jordan".into(),
            pathology: "ACL".into(),
            phase_name: "Strength".into(),
            phase_index: 1,
            fields: vec![FormField {
                metric_name: "knee_flexion".into(),
                input_id: "metric-knee_flexion".into(),
                help_id: "help-knee_flexion".into(),
                display_label: "knee flexion".into(),
                placeholder: "120".into(),
                unit: "degrees".into(),
                help_text: "Target: >= 120 degrees".into(),
            }],
        };
        let html = render_clinician_page("CLT_1", Some(&form), None, &Kinetic);
        assert!(html.contains(r#"name="metric-knee_flexion""#));
        assert!(html.contains(r#"placeholder="e.g., 120""#));
        assert!(html.contains("Target: &gt;= 120 degrees"));
        assert!(html.contains(r#"name="client_id" value="CLT_1""#));
    }

    #[test]
    fn dashboard_links_encode_ids() {
        let journey: crate::models::Journey = serde_json::from_value(serde_json::json!({
            "client": { "name": "Jordan", "protocolId": "PAT/ACL?v=2" },
            "phases": [{ "name": "Phase 1", "status": "active" }]
        }))
        .unwrap();
        let expansion = crate::view::ExpansionState::initial(&journey, true);
        let view = crate::view::render_dashboard(&journey, &expansion);

        let html = render_dashboard_page(&view, "CLT&open=9#x", &Kinetic);
        assert!(html.contains(r#"href="/protocol/PAT%2FACL%3Fv%3D2""#));
        assert!(html.contains(r#"href="/?client=CLT%26open%3D9%23x&amp;open=0""#));
        assert!(!html.contains("CLT&open=9"));
    }

    #[test]
    fn protocol_links_encode_ids() {
        let page = render_protocol_page("PAT #1", Ok("<p>body</p>"));
        assert!(page.contains(r#"action="/protocol/PAT%20%231/flag""#));
        assert!(page.contains(r#"data-current-protocol="PAT #1""#));

        let confirmation = render_flag_confirmation("a/b");
        assert!(confirmation.contains(r#"href="/protocol/a%2Fb""#));
        assert!(confirmation.contains("review protocol a/b."));
    }

    #[test]
    fn updated_dashboard_link_encodes_client() {
        let status = StatusMessage {
            kind: StatusKind::Success,
            text: "Saved".into(),
        };
        let html = render_clinician_page("CLT 1&x", None, Some(&status), &Kinetic);
        assert!(html.contains(r#"href="/?client=CLT%201%26x""#));
        assert!(html.contains(r#"name="client" value="CLT 1&amp;x""#));
    }

    #[test]
    fn error_page_escapes_message() {
        let html = render_error_page("<script>");
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("{{BODY}}"));
    }

    #[test]
    fn icon_preview_lists_every_theme() {
        let html = render_icon_preview();
        for theme in IconTheme::ALL {
            assert!(html.contains(&format!("id=\"theme-{}\"", theme.icon_set().name())));
        }
    }
}
