// src/surface/terminal.rs
use std::fmt::Write as _;
use std::io::Write;
use std::path::PathBuf;

use crate::dashboard::{DashboardView, ScorePanel};
use crate::errors::Result;
use crate::palette;
use crate::report::{self, ReportDocument};
use crate::surface::{Alert, Surface};
use crate::ui::{Phase, Visibility};

/// Draws the dashboard as text; the report document goes to a file.
pub struct TerminalSurface<W: Write> {
    out: W,
    report_dir: PathBuf,
    color: bool,
    last_phase: Option<Phase>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, report_dir: impl Into<PathBuf>) -> Self {
        Self {
            out,
            report_dir: report_dir.into(),
            color: true,
            last_phase: None,
        }
    }

    pub fn without_color(mut self) -> Self {
        self.color = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            log::error!("terminal write failed: {}", e);
        }
    }
}

/// Wraps `text` in a 24-bit foreground colour when `token` is `#rrggbb`.
pub fn paint(text: &str, token: &str, enabled: bool) -> String {
    match palette::hex_to_rgb(token) {
        Some((r, g, b)) if enabled => format!("\x1b[38;2;{r};{g};{b}m{text}\x1b[0m"),
        _ => text.to_string(),
    }
}

pub fn render_dashboard(view: &DashboardView, color: bool) -> String {
    let mut s = String::new();
    let rule = "=".repeat(60);

    let _ = writeln!(s, "\n{}", rule);
    if let Some(meta) = &view.meta {
        let _ = writeln!(
            s,
            "🏷️  Model {} @ {}{}",
            meta.version.as_deref().unwrap_or("unversioned"),
            meta.timestamp.as_deref().unwrap_or("-"),
            if meta.cooldown { "  (cooldown)" } else { "" }
        );
    }

    let a = &view.automation;
    let _ = writeln!(s, "🤖 AUTOMATION: {}", paint(&a.action, &a.color, color));
    if let Some(status) = &a.status {
        let _ = writeln!(s, "   STATUS: {}", status);
    }
    let _ = writeln!(s, "   RULE: {}", a.rule);
    let _ = writeln!(s, "   {}", a.details);
    let _ = writeln!(s, "   ⚡ PIPELINE: {}", a.pipeline);
    let _ = writeln!(s, "   📅 STRATEGY: {}", a.strategy);

    let _ = writeln!(s, "\n💰 REVENUE AT RISK: {}", view.financials.risk_amount);
    let _ = writeln!(s, "   {}", paint(&view.financials.disclaimer, palette::MUTED, color));

    match &view.score {
        ScorePanel::BiasDetected { label, color: token } => {
            let _ = writeln!(s, "\n🩺 MODEL SCORE: {}", paint(label, token, color));
        }
        ScorePanel::Health {
            reliability,
            color: token,
            est_f1_drop,
        } => {
            let _ = writeln!(s, "\n🩺 MODEL SCORE: {}", paint(reliability, token, color));
            let _ = writeln!(
                s,
                "   {}",
                paint(&format!("Est. F1: {}", est_f1_drop), palette::MUTED, color)
            );
        }
    }

    let _ = writeln!(s, "\n🏆 DRIFT LEADERBOARD");
    if view.leaderboard.is_empty() {
        let _ = writeln!(s, "   (no features reported)");
    }
    for row in &view.leaderboard {
        let _ = writeln!(
            s,
            "   {} {:<24} [{}] {}",
            paint("│", &row.badge_color, color),
            row.feature,
            paint(&row.impact_tag, &row.badge_color, color),
            paint(&row.score, &row.score_color, color)
        );
        let _ = writeln!(s, "     👉 {}", row.suggested_action);
    }
    let _ = writeln!(s, "{}", rule);
    s
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn apply(&mut self, phase: Phase, _visibility: &Visibility) {
        if self.last_phase == Some(phase) {
            return;
        }
        self.last_phase = Some(phase);
        let line = match phase {
            Phase::Processing => "⏳ Analyzing datasets...\n",
            Phase::Idle => "✅ Ready for the next analysis.\n",
            Phase::Revealed => "📊 Analysis complete.\n",
        };
        self.emit(line);
    }

    fn alert(&mut self, alert: &Alert) {
        self.emit(&format!("\n{}\n", alert));
    }

    fn show_report(&mut self, document: &ReportDocument) -> Result<()> {
        let path = report::write_report(&self.report_dir, document)?;
        self.emit(&format!("📄 Report written to {}\n", path.display()));
        Ok(())
    }

    fn show_dashboard(&mut self, view: &DashboardView) {
        let text = render_dashboard(view, self.color);
        self.emit(&text);
    }
}
