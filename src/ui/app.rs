use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use eframe::egui::{
    self, Align, Color32, Event, Key, Layout, RichText, ScrollArea, TopBottomPanel, Ui,
};

use crate::calc::session::{CalcSession, Op, Token};
use crate::store;

const INPUT_HINT: &str = "Enter a time as H:MM";
const BUTTON_HEIGHT: f32 = 44.0;

const HELP_LINES: [&str; 4] = [
    "Enter times as hours and minutes, for example 1:30.",
    "A value without a colon is read as minutes: 90 becomes 1:30.",
    "Four digits without a colon are read as HHMM: 1230 becomes 12:30.",
    "+ and - chain values, = prints the signed total. CE clears the input; \
     pressing CE again clears everything.",
];

pub fn run_gui(session: CalcSession, session_file: Option<PathBuf>) -> Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("TimeCalc")
            .with_inner_size([440.0, 680.0])
            .with_min_inner_size([360.0, 540.0]),
        ..Default::default()
    };

    let app = TimeCalcApp::new(session, session_file);

    eframe::run_native(
        "TimeCalc",
        native_options,
        Box::new(move |cc| {
            configure_theme(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| anyhow::anyhow!("failed to launch TimeCalc GUI: {err}"))?;

    Ok(())
}

fn configure_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.override_text_color = Some(Color32::from_rgb(226, 234, 246));
    visuals.panel_fill = Color32::from_rgb(8, 16, 26);
    visuals.window_fill = Color32::from_rgb(12, 20, 32);
    visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(10, 18, 30);
    visuals.widgets.inactive.bg_fill = Color32::from_rgb(16, 24, 38);
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(26, 42, 62);
    visuals.widgets.active.bg_fill = Color32::from_rgb(34, 60, 88);
    visuals.selection.bg_fill = Color32::from_rgb(43, 148, 178);
    ctx.set_visuals(visuals);
}

struct TimeCalcApp {
    session: CalcSession,
    session_file: Option<PathBuf>,
    show_help: bool,
    status_message: Option<(String, Instant)>,
}

impl TimeCalcApp {
    fn new(session: CalcSession, session_file: Option<PathBuf>) -> Self {
        Self {
            session,
            session_file,
            show_help: false,
            status_message: None,
        }
    }

    fn set_status(&mut self, text: impl Into<String>, ttl: Duration) {
        self.status_message = Some((text.into(), Instant::now() + ttl));
    }

    fn persist_session(&self) -> Result<()> {
        match &self.session_file {
            Some(path) => store::save_session(path, &self.session),
            None => Ok(()),
        }
    }

    fn press_token(&mut self, token: Token) {
        self.session.press(token);
        if let Err(err) = self.persist_session() {
            self.set_status(format!("Persist failed: {err}"), Duration::from_secs(4));
        }
    }

    fn paste_input(&mut self, text: &str) {
        self.session.replace_input(text);
        if let Err(err) = self.persist_session() {
            self.set_status(format!("Persist failed: {err}"), Duration::from_secs(4));
        }
    }

    /// Maps raw keyboard and clipboard events onto keypad tokens so the
    /// calculator is usable without the mouse.
    fn collect_input_events(&self, ctx: &egui::Context) -> (Vec<Token>, Option<String>) {
        let mut tokens = Vec::new();
        let mut pasted = None;
        ctx.input(|i| {
            for event in &i.events {
                match event {
                    Event::Text(text) => {
                        for c in text.chars() {
                            if let Some(token) = Token::from_char(c) {
                                tokens.push(token);
                            }
                        }
                    }
                    Event::Key {
                        key: Key::Enter,
                        pressed: true,
                        ..
                    } => tokens.push(Token::Op(Op::Equals)),
                    Event::Key {
                        key: Key::Escape,
                        pressed: true,
                        ..
                    } => tokens.push(Token::Clear),
                    Event::Paste(text) => pasted = Some(text.clone()),
                    _ => {}
                }
            }
        });
        (tokens, pasted)
    }

    fn show_input_line(&mut self, ui: &mut Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("TimeCalc")
                    .size(22.0)
                    .color(Color32::from_rgb(96, 228, 206))
                    .strong(),
            );
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("Help").clicked() {
                    self.show_help = !self.show_help;
                }
                if !self.session.input().trim().is_empty() && ui.button("Copy").clicked() {
                    ctx.copy_text(self.session.input().to_string());
                    self.set_status("Input copied.", Duration::from_secs(2));
                }
            });
        });
        ui.add_space(4.0);

        let (text, color) = if self.session.input().is_empty() {
            (INPUT_HINT, Color32::from_rgb(120, 136, 158))
        } else {
            (self.session.input(), Color32::from_rgb(255, 214, 117))
        };
        egui::Frame::group(ui.style())
            .fill(Color32::from_rgb(16, 26, 40))
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.label(RichText::new(text).size(24.0).monospace().color(color));
            });

        if let Some((msg, _)) = &self.status_message {
            ui.label(
                RichText::new(msg)
                    .color(Color32::from_rgb(111, 228, 134))
                    .strong(),
            );
        }
    }

    fn show_transcript(&self, ui: &mut Ui) {
        ScrollArea::vertical()
            .id_salt("transcript_scroll")
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.label(
                    RichText::new(self.session.output())
                        .size(18.0)
                        .monospace()
                        .color(Color32::from_rgb(114, 220, 205)),
                );
            });
    }

    fn show_keypad(&mut self, ui: &mut Ui) -> Option<Token> {
        // Same layout as the original keypad; 0 spans two columns.
        let rows: [&[&str]; 4] = [
            &["7", "8", "9", "CE"],
            &["4", "5", "6", "-"],
            &["1", "2", "3", "+"],
            &["0", ":", "="],
        ];

        let mut pressed = None;
        let spacing = ui.spacing().item_spacing.x;
        for row in rows {
            let unit = (ui.available_width() - spacing * 3.0) / 4.0;
            ui.horizontal(|ui| {
                for label in row {
                    let width = if *label == "0" {
                        unit * 2.0 + spacing
                    } else {
                        unit
                    };
                    let button = egui::Button::new(RichText::new(*label).size(20.0).strong());
                    if ui.add_sized([width, BUTTON_HEIGHT], button).clicked() {
                        pressed = Token::from_label(label);
                    }
                }
            });
        }
        pressed
    }

    fn show_help_panel(&self, ui: &mut Ui) {
        ui.heading(
            RichText::new("Help")
                .color(Color32::from_rgb(104, 221, 205))
                .strong(),
        );
        ui.add_space(4.0);
        for (index, line) in HELP_LINES.iter().enumerate() {
            ui.label(*line);
            if index < HELP_LINES.len() - 1 {
                ui.separator();
            }
        }
        ui.add_space(8.0);
        ui.label(
            RichText::new(
                "Keyboard works too: digits, :, +, -, = (or Enter), Esc for CE, Ctrl+V to paste.",
            )
            .color(Color32::from_rgb(161, 180, 201)),
        );
    }
}

impl eframe::App for TimeCalcApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some((_, expires_at)) = &self.status_message
            && Instant::now() >= *expires_at
        {
            self.status_message = None;
        }

        let (typed_tokens, pasted) = self.collect_input_events(ctx);
        if let Some(text) = pasted {
            self.paste_input(&text);
        }
        for token in typed_tokens {
            self.press_token(token);
        }

        TopBottomPanel::top("input_line")
            .resizable(false)
            .show(ctx, |ui| {
                self.show_input_line(ui, ctx);
                ui.add_space(4.0);
            });

        let mut clicked = None;
        TopBottomPanel::bottom("keypad")
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                clicked = self.show_keypad(ui);
                ui.add_space(6.0);
            });

        if self.show_help {
            egui::SidePanel::right("help_panel")
                .resizable(true)
                .min_width(220.0)
                .default_width(260.0)
                .show(ctx, |ui| self.show_help_panel(ui));
        }

        egui::CentralPanel::default().show(ctx, |ui| self.show_transcript(ui));

        if let Some(token) = clicked {
            self.press_token(token);
        }
    }
}
