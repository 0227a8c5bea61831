use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use eframe::egui::{self, Color32, RichText};

use crate::dial;
use crate::ephemeris::{self, SelectedEphemeris};
use crate::prefs::{self, SitePreferences};
use crate::readout::{self, Readouts};
use crate::scene::{self, DialScene};
use crate::ui::paint;

const STATUS_TTL: Duration = Duration::from_secs(6);

/// Open the clock window and run it until closed. The window is sized
/// from the dial width preference; the dial canvas itself keeps the size
/// captured at startup even if preferences change mid-session.
pub fn run_gui(
    selected: SelectedEphemeris,
    prefs: SitePreferences,
    prefs_path: PathBuf,
    refresh: Duration,
) -> Result<()> {
    let side = (prefs.dial_width as f32 * 1.5).max(480.0);
    let app = ObservatoryApp::new(selected, prefs, prefs_path, refresh)?;
    let options = eframe::NativeOptions {
        vsync: false,
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("Observatory Clock {}", env!("CARGO_PKG_VERSION")))
            .with_inner_size([side, side])
            .with_min_inner_size([480.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Observatory Clock",
        options,
        Box::new(move |cc| {
            configure_theme(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| anyhow::anyhow!("failed to launch the clock window: {err}"))?;
    Ok(())
}

/// Light theme over a white canvas so the dial reads like the printed
/// wall charts it imitates.
fn configure_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::light();
    visuals.panel_fill = Color32::WHITE;
    visuals.window_fill = Color32::from_rgb(246, 246, 246);
    ctx.set_visuals(visuals);
}

struct ObservatoryApp {
    selected: SelectedEphemeris,
    prefs: SitePreferences,
    prefs_path: PathBuf,
    refresh: Duration,
    next_tick: Instant,
    // Canvas geometry is frozen at startup; width and font edits apply on
    // the next launch.
    display_font: u32,
    display_width: u32,
    previous_moon_fraction: f64,
    scene: DialScene,
    readouts: Readouts,
    settings_open: bool,
    about_open: bool,
    name_input: String,
    latitude_input: String,
    longitude_input: String,
    font_input: String,
    width_input: String,
    status_message: Option<(String, Instant)>,
}

impl ObservatoryApp {
    fn new(
        selected: SelectedEphemeris,
        prefs: SitePreferences,
        prefs_path: PathBuf,
        refresh: Duration,
    ) -> Result<Self> {
        let input = ephemeris::observe(&selected, &prefs, 0.0)?;
        let scene = dial::compute_tick(&input);
        let readouts = readout::build(&input, &prefs.site_name);
        let previous_moon_fraction = input.sky.moon_fraction;
        let [name_input, latitude_input, longitude_input, font_input, width_input] =
            form_fields(&prefs);
        Ok(Self {
            display_font: prefs.font_size,
            display_width: prefs.dial_width,
            selected,
            prefs,
            prefs_path,
            refresh,
            next_tick: Instant::now() + refresh,
            previous_moon_fraction,
            scene,
            readouts,
            settings_open: false,
            about_open: false,
            name_input,
            latitude_input,
            longitude_input,
            font_input,
            width_input,
            status_message: None,
        })
    }

    fn set_status(&mut self, text: impl Into<String>) {
        self.status_message = Some((text.into(), Instant::now() + STATUS_TTL));
    }

    /// Site fields follow the live preferences; canvas geometry stays at
    /// the startup values.
    fn effective_prefs(&self) -> SitePreferences {
        SitePreferences {
            site_name: self.prefs.site_name.clone(),
            latitude: self.prefs.latitude,
            longitude: self.prefs.longitude,
            font_size: self.display_font,
            dial_width: self.display_width,
        }
    }

    fn run_tick(&mut self) {
        let prefs = self.effective_prefs();
        match ephemeris::observe(&self.selected, &prefs, self.previous_moon_fraction) {
            Ok(input) => {
                self.scene = dial::compute_tick(&input);
                self.readouts = readout::build(&input, &prefs.site_name);
                self.previous_moon_fraction = input.sky.moon_fraction;
            }
            Err(err) => self.set_status(format!("Tick failed: {err:#}")),
        }
    }

    fn apply_settings(&mut self) {
        let name = self.name_input.clone();
        let latitude = self.latitude_input.clone();
        let longitude = self.longitude_input.clone();
        let font = self.font_input.clone();
        let width = self.width_input.clone();
        match prefs::apply_site_update(&mut self.prefs, &name, &latitude, &longitude, &font, &width)
        {
            Ok(()) => {
                match prefs::save_preferences(&self.prefs_path, &self.prefs) {
                    Ok(()) => self.set_status("Preferences saved"),
                    Err(err) => self.set_status(format!("Preferences not saved: {err:#}")),
                }
                self.next_tick = Instant::now();
            }
            Err(err) => self.set_status(format!("Update refused: {err:#}")),
        }
    }

    fn restore_defaults(&mut self) {
        self.prefs = SitePreferences::default();
        let [name, latitude, longitude, font, width] = form_fields(&self.prefs);
        self.name_input = name;
        self.latitude_input = latitude;
        self.longitude_input = longitude;
        self.font_input = font;
        self.width_input = width;
        self.next_tick = Instant::now();
    }

    fn header_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").resizable(false).show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(self.readouts.site_name.clone())
                        .size(20.0)
                        .strong()
                        .color(paint::egui_color(scene::DIAL_PURPLE)),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("About").clicked() {
                        self.about_open = true;
                    }
                    if ui.button("Preferences").clicked() {
                        self.settings_open = true;
                    }
                });
            });
            ui.horizontal(|ui| {
                ui.label(RichText::new(self.readouts.friendly_date.clone()).size(14.0));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(self.readouts.file_prefix.clone())
                            .size(12.0)
                            .color(Color32::GRAY),
                    );
                });
            });
            ui.add_space(4.0);
        });
    }

    fn readout_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("readouts").resizable(false).show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                readout_value(
                    ui,
                    "LOCAL",
                    &self.readouts.local_hhmm,
                    paint::egui_color(scene::DIAL_PURPLE),
                );
                readout_value(
                    ui,
                    "LST",
                    &self.readouts.sidereal_local_hhmm,
                    paint::egui_color(scene::SIDEREAL_BLUE),
                );
                readout_value(ui, "UT", &self.readouts.ut_hhmm, paint::egui_color(scene::UT_RED));
                readout_value(
                    ui,
                    "GST",
                    &self.readouts.sidereal_greenwich_hhmm,
                    paint::egui_color(scene::INK),
                );
            });
            ui.horizontal(|ui| {
                readout_value(
                    ui,
                    "JD",
                    &format!("{:.4}", self.readouts.julian_date),
                    paint::egui_color(scene::INK),
                );
                readout_value(
                    ui,
                    "MJD",
                    &format!("{:.4}", self.readouts.modified_julian_date),
                    paint::egui_color(scene::INK),
                );
            });
            ui.horizontal(|ui| {
                let green = paint::egui_color(scene::EVENT_GREEN);
                match (&self.readouts.sunrise, &self.readouts.sunset) {
                    (Some(rise), Some(set)) => {
                        readout_value(ui, "\u{2609}RISE", rise, green);
                        readout_value(ui, "\u{2609}SET", set, green);
                        readout_value(
                            ui,
                            "Night",
                            &format!("{} h", self.readouts.night_length_hours),
                            green,
                        );
                    }
                    _ => {
                        ui.label(
                            RichText::new("No sun rise/set for this date")
                                .monospace()
                                .size(14.0)
                                .color(Color32::GRAY),
                        );
                    }
                }
            });
            ui.label(
                RichText::new(self.readouts.illumination_line())
                    .monospace()
                    .size(14.0),
            );
            if let Some(reason) = &self.selected.fallback_reason {
                ui.label(RichText::new(reason.clone()).size(11.0).color(Color32::GRAY));
            }
            if let Some((message, _)) = &self.status_message {
                ui.label(
                    RichText::new(message.clone())
                        .size(12.0)
                        .color(Color32::from_rgb(196, 120, 0)),
                );
            }
            ui.add_space(4.0);
        });
    }

    fn canvas_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                let side = self.display_width as f32;
                let (response, painter) =
                    ui.allocate_painter(egui::vec2(side, side), egui::Sense::hover());
                paint::paint_scene(&painter, response.rect.min, &self.scene);
            });
        });
    }

    fn settings_window(&mut self, ctx: &egui::Context) {
        if !self.settings_open {
            return;
        }
        let mut open = self.settings_open;
        let mut set_clicked = false;
        let mut defaults_clicked = false;
        egui::Window::new("Observatory preferences")
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                labeled_field(ui, "Site name", &mut self.name_input);
                labeled_field(ui, "Latitude", &mut self.latitude_input);
                labeled_field(ui, "Longitude (west negative)", &mut self.longitude_input);
                labeled_field(ui, "Font size", &mut self.font_input);
                labeled_field(ui, "Dial width", &mut self.width_input);
                ui.label(
                    RichText::new("Font size and dial width take effect after a restart.")
                        .size(11.0)
                        .color(Color32::GRAY),
                );
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    if ui.button("Set").clicked() {
                        set_clicked = true;
                    }
                    if ui.button("Default values").clicked() {
                        defaults_clicked = true;
                    }
                });
            });
        self.settings_open = open;
        if set_clicked {
            self.apply_settings();
        }
        if defaults_clicked {
            self.restore_defaults();
        }
    }

    fn about_window(&mut self, ctx: &egui::Context) {
        if !self.about_open {
            return;
        }
        let mut open = self.about_open;
        egui::Window::new("About the Observatory Clock")
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(
                    RichText::new(format!("Observatory Clock {}", env!("CARGO_PKG_VERSION")))
                        .strong(),
                );
                ui.add_space(6.0);
                ui.label(
                    "A 24-hour dial for the observatory floor. The purple hand shows \
                     local civil time, the red hand Universal Time, and the blue hand \
                     Local Sidereal Time against the rotating ring of sidereal hours.",
                );
                ui.add_space(4.0);
                ui.label(
                    "Sun, Moon and planets are plotted by right ascension, so whatever \
                     the blue hand points at is crossing the meridian. The grey spokes \
                     mark the rising and setting horizon, the shaded wedge spans the \
                     night between the green sunrise and sunset marks, and the short \
                     crosshairs show where the Moon would stand at new, first quarter, \
                     full and third quarter.",
                );
                ui.add_space(6.0);
                ui.label(
                    RichText::new("Press q to quit.")
                        .size(11.0)
                        .color(Color32::GRAY),
                );
            });
        self.about_open = open;
    }
}

impl eframe::App for ObservatoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some((_, expires_at)) = &self.status_message
            && Instant::now() >= *expires_at
        {
            self.status_message = None;
        }
        if !ctx.wants_keyboard_input() && ctx.input(|i| i.key_pressed(egui::Key::Q)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        if Instant::now() >= self.next_tick {
            self.run_tick();
            self.next_tick = Instant::now() + self.refresh;
        }

        self.header_panel(ctx);
        self.readout_panel(ctx);
        self.canvas_panel(ctx);
        self.settings_window(ctx);
        self.about_window(ctx);

        let wait = self.next_tick.saturating_duration_since(Instant::now());
        ctx.request_repaint_after(wait);
    }
}

fn readout_value(ui: &mut egui::Ui, label: &str, value: &str, color: Color32) {
    ui.label(
        RichText::new(format!("{label} {value}"))
            .monospace()
            .size(14.0)
            .color(color),
    );
}

fn labeled_field(ui: &mut egui::Ui, label: &str, value: &mut String) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.add(egui::TextEdit::singleline(value).desired_width(160.0));
        });
    });
}

fn form_fields(prefs: &SitePreferences) -> [String; 5] {
    [
        prefs.site_name.clone(),
        prefs.latitude.to_string(),
        prefs.longitude.to_string(),
        prefs.font_size.to_string(),
        prefs.dial_width.to_string(),
    ]
}
