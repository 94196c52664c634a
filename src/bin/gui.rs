#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 발전소 경제성 대시보드 진입점.

use eframe::{egui, App, Frame};
use image::GenericImageView;
use log::{error, info, warn};
use rfd::FileDialog;
use std::{env, f32::consts::TAU, fs, path::Path};
use power_plant_economics::{
    charts::{self, DailyStats, Histogram, DEFAULT_HISTOGRAM_BINS},
    config,
    engine::EngineCatalog,
    expenses::{ExpenseCategory, ExpenseMap},
    i18n, log as logger,
    metrics::{self, MetricsError, MetricsResult, ScenarioInput},
    price_table::{PriceTable, HOURS_PER_DAY},
    report,
};

/// 파이 차트 조각 색상(순서대로 운영비 항목에 대응).
const SLICE_COLOURS: [egui::Color32; 5] = [
    egui::Color32::from_rgb(99, 110, 250),
    egui::Color32::from_rgb(239, 85, 59),
    egui::Color32::from_rgb(0, 204, 150),
    egui::Color32::from_rgb(171, 99, 250),
    egui::Color32::from_rgb(255, 161, 90),
];
const MIN_COLOUR: egui::Color32 = egui::Color32::from_rgb(31, 119, 180);
const MAX_COLOUR: egui::Color32 = egui::Color32::from_rgb(214, 39, 40);
const AVG_COLOUR: egui::Color32 = egui::Color32::from_rgb(44, 160, 44);

fn main() -> Result<(), eframe::Error> {
    // --lang xx / --lang=xx, --data path / --data=path
    let mut cli_lang: Option<String> = None;
    let mut cli_data: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if let Some(val) = a.strip_prefix("--data=") {
            cli_data = Some(val.to_string());
        } else if (a == "--lang" || a == "-L" || a == "--data" || a == "-d") && i + 1 < args.len() {
            if a == "--data" || a == "-d" {
                cli_data = Some(args[i + 1].clone());
            } else {
                cli_lang = Some(args[i + 1].clone());
            }
            i += 1;
        }
        i += 1;
    }

    let mut app_cfg = match config::load_or_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Config error, using defaults: {e}");
            config::Config::default()
        }
    };
    if let Err(e) = logger::init(Some(&app_cfg.log_level)) {
        eprintln!("Logger error: {e}");
    }
    if let Some(lang_cli) = cli_lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }
    if let Some(data) = cli_data {
        app_cfg.price_data_path = data;
    }

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(egui::vec2(1280.0, 860.0))
        .with_transparent(true);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let native = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "Power Plant Economic Analysis Dashboard",
        native,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                warn!("{e}");
            }
            Box::new(GuiApp::new(app_cfg.clone()))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

/// 바이너리 폰트 바이트를 egui 기본 폰트 뒤(대체 글꼴)로 등록한다.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(font_name.clone());
    }
    ctx.set_fonts(fonts);
}

/// 한글 표시용 글꼴을 찾아 등록한다. assets/fonts → OS 글꼴 순으로 찾는다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates = vec![
        Path::new("assets/fonts/NanumGothic.ttf").to_path_buf(),
        Path::new("assets/fonts/malgun.ttf").to_path_buf(),
        Path::new("/usr/share/fonts/truetype/nanum/NanumGothic.ttf").to_path_buf(),
        Path::new("/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc").to_path_buf(),
        Path::new("/System/Library/Fonts/AppleSDGothicNeo.ttc").to_path_buf(),
    ];
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        candidates.push(fonts.join("malgun.ttf"));
        candidates.push(fonts.join("gulim.ttc"));
    }
    for p in candidates {
        if p.exists() {
            let bytes = fs::read(&p)
                .map_err(|e| format!("Failed to read font ({}): {e}", p.display()))?;
            apply_font_bytes(ctx, bytes, "hangul_font");
            info!("Loaded fallback font {}", p.display());
            return Ok(());
        }
    }
    Err("No Hangul font found; set a font file in settings to display Korean text.".into())
}

/// 사용자가 선택한 경로의 폰트를 egui에 등록한다.
fn load_custom_font(ctx: &egui::Context, path: &str) -> Result<(), String> {
    let p = Path::new(path);
    if !p.exists() {
        return Err(format!("Font file not found: {path}"));
    }
    let bytes = fs::read(p).map_err(|e| format!("Failed to read font file: {e}"))?;
    apply_font_bytes(ctx, bytes, "user_font");
    Ok(())
}

fn label_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.label(text).on_hover_text(tip)
}

fn heading_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.heading(text).on_hover_text(tip)
}

fn to_colour32(rgb: [u8; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

/// 히트맵 안의 좌표를 (행, 열) 칸으로 바꾼다.
fn heat_cell_at(rect: egui::Rect, pos: egui::Pos2, rows: usize, cols: usize) -> Option<(usize, usize)> {
    if rows == 0 || cols == 0 || !rect.contains(pos) {
        return None;
    }
    let col = ((pos.x - rect.left()) / rect.width() * cols as f32) as usize;
    let row = ((pos.y - rect.top()) / rect.height() * rows as f32) as usize;
    Some((row.min(rows - 1), col.min(cols - 1)))
}

/// 비중 목록을 (시작각, 끝각) 라디안 구간으로 바꾼다. 12시 방향에서 시계방향.
fn pie_angles(shares: &[f64]) -> Vec<(f32, f32)> {
    let start = -TAU / 4.0;
    let mut acc = 0.0_f32;
    shares
        .iter()
        .map(|s| {
            let a0 = start + acc * TAU;
            acc += *s as f32;
            (a0, start + acc * TAU)
        })
        .collect()
}

/// 가격표와 이로부터 만든 차트 데이터.
struct PriceData {
    table: PriceTable,
    histogram: Histogram,
    daily: Vec<DailyStats>,
}

impl PriceData {
    fn new(table: PriceTable) -> Self {
        let histogram = Histogram::from_values(table.cells(), DEFAULT_HISTOGRAM_BINS);
        let daily = charts::daily_stats(&table);
        Self {
            table,
            histogram,
            daily,
        }
    }
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    engines: EngineCatalog,
    data_path: String,
    prices: Result<PriceData, String>,
    scenario: ScenarioInput,
    computed_for: Option<ScenarioInput>,
    metrics: Option<Result<MetricsResult, MetricsError>>,
    // 설정
    lang_input: String,
    window_alpha: f32,
    ui_scale: f32,
    custom_font_path: String,
    font_load_error: Option<String>,
    settings_status: Option<String>,
    show_settings_modal: bool,
    show_help_modal: bool,
    show_formula_modal: bool,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        info!("GUI language resolved: {lang_code}");
        let engines = EngineCatalog::builtin();
        let scenario = config.scenario.clone().clamped();
        let data_path = config.price_data_path.clone();
        let mut s = Self {
            lang_input: config.language.clone(),
            window_alpha: config.window_alpha.clamp(0.3, 1.0),
            config,
            tr,
            engines,
            prices: Err(String::new()),
            data_path,
            scenario,
            computed_for: None,
            metrics: None,
            ui_scale: 1.0,
            custom_font_path: String::new(),
            font_load_error: None,
            settings_status: None,
            show_settings_modal: false,
            show_help_modal: false,
            show_formula_modal: false,
        };
        s.reload_prices();
        s
    }

    /// 현재 경로의 가격표를 다시 읽는다. 실패하면 오류 문구를 보관하고 지표를 비운다.
    fn reload_prices(&mut self) {
        self.prices = match PriceTable::load(Path::new(&self.data_path)) {
            Ok(table) => Ok(PriceData::new(table)),
            Err(e) => {
                error!("{e}");
                Err(e.to_string())
            }
        };
        self.computed_for = None;
        self.metrics = None;
        self.recompute_if_changed();
    }

    /// 입력이 바뀐 경우에만 지표를 다시 계산한다.
    fn recompute_if_changed(&mut self) {
        let Ok(data) = &self.prices else {
            return;
        };
        if self.computed_for.as_ref() == Some(&self.scenario) {
            return;
        }
        let result = metrics::compute_metrics(&self.scenario, &self.engines, &data.table);
        if let Err(e) = &result {
            warn!("Metrics unavailable: {e}");
        }
        self.metrics = Some(result);
        self.computed_for = Some(self.scenario.clone());
    }

    fn pick_data_file(&mut self) {
        if let Some(path) = FileDialog::new().add_filter("CSV", &["csv"]).pick_file() {
            self.data_path = path.display().to_string();
            self.config.price_data_path = self.data_path.clone();
            self.reload_prices();
        }
    }

    fn ui_sidebar(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = move |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());

        ui.heading(txt("gui.config.heading", "Configuration"));
        ui.add_space(4.0);
        egui::Grid::new("scenario_grid")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                label_with_tip(
                    ui,
                    &txt("gui.config.engine", "Select Engine Type"),
                    &txt("gui.config.engine_tip", "Engine model from the catalog"),
                );
                egui::ComboBox::from_id_source("engine_choice")
                    .selected_text(self.scenario.engine.clone())
                    .show_ui(ui, |ui| {
                        for e in self.engines.iter() {
                            ui.selectable_value(&mut self.scenario.engine, e.name.to_string(), e.name)
                                .on_hover_text(format!(
                                    "{} kW, {} / h, {}",
                                    e.rated_power_kw,
                                    e.fuel_consumption_rate,
                                    report::format_amount(e.unit_price)
                                ));
                        }
                    });
                ui.end_row();

                ui.label(txt("gui.config.num_engines", "Number of Engines"));
                ui.add(egui::DragValue::new(&mut self.scenario.num_engines).clamp_range(1..=1000));
                ui.end_row();

                ui.label(txt("gui.config.load", "Load Percentage"));
                ui.add(egui::Slider::new(&mut self.scenario.load_percentage, 0.0..=100.0).step_by(1.0).suffix("%"));
                ui.end_row();

                label_with_tip(
                    ui,
                    &txt("gui.config.gas_price", "Gas Price (per m³)"),
                    &txt("gui.config.gas_price_tip", "Recorded with the scenario; not used by the formulas."),
                );
                ui.add(
                    egui::DragValue::new(&mut self.scenario.gas_price)
                        .speed(0.1)
                        .clamp_range(0.0..=f64::MAX),
                );
                ui.end_row();
            });

        ui.separator();
        ui.heading(txt("gui.expenses.heading", "Monthly Expenses"));
        egui::Grid::new("expense_grid")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                for category in ExpenseCategory::ALL {
                    ui.label(txt(&format!("gui.expenses.{}", category.key()), category.label()));
                    ui.add(egui::DragValue::new(self.scenario.expenses.get_mut(category)).speed(100.0));
                    ui.end_row();
                }
            });
        if ui.button(txt("gui.expenses.reset", "Reset to defaults")).clicked() {
            self.scenario.expenses = ExpenseMap::default();
        }

        ui.separator();
        ui.heading(txt("gui.data.heading", "Price Data"));
        ui.label(egui::RichText::new(&self.data_path).small());
        ui.horizontal(|ui| {
            if ui.button(txt("gui.data.open", "Open CSV…")).clicked() {
                self.pick_data_file();
            }
            if ui.button(txt("gui.data.reload", "Reload")).clicked() {
                self.reload_prices();
            }
        });
    }

    fn ui_metric_cards(&self, ui: &mut egui::Ui, m: &MetricsResult) {
        let tr = self.tr.clone();
        let txt = move |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        let cards = report::metric_cards(m);
        let keys = [
            "gui.metrics.generation",
            "gui.metrics.investment",
            "gui.metrics.roe",
            "gui.metrics.roa",
            "gui.metrics.availability",
            "gui.metrics.monthly_revenue",
        ];
        // 3열 카드: (발전량, 투자비) (ROE, ROA) (가동률, 월 매출)
        ui.columns(3, |cols| {
            for (i, col) in cols.iter_mut().enumerate() {
                for j in 0..2 {
                    let idx = i * 2 + j;
                    let (label, value) = &cards[idx];
                    egui::Frame::group(col.style()).show(col, |ui| {
                        ui.set_min_width(ui.available_width());
                        ui.label(txt(keys[idx], label));
                        ui.heading(egui::RichText::new(value).strong());
                    });
                    col.add_space(6.0);
                }
            }
        });
        if m.availability_pct == 0.0 {
            ui.small(txt(
                "gui.metrics.availability_note",
                "Availability counts hours priced above the table minimum; a flat table reports 0%.",
            ));
        }
    }

    fn ui_heatmap(ui: &mut egui::Ui, table: &PriceTable, min: f64, max: f64) {
        let rows = table.num_days();
        let width = ui.available_width().max(200.0);
        let height = (rows as f32 * 14.0).clamp(60.0, 420.0);
        let (rect, response) = ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::hover());
        let painter = ui.painter_at(rect);
        let cell_w = rect.width() / HOURS_PER_DAY as f32;
        let cell_h = rect.height() / rows.max(1) as f32;
        for (r, row) in table.rows().iter().enumerate() {
            for (c, v) in row.iter().enumerate() {
                let min_pt = egui::pos2(rect.left() + c as f32 * cell_w, rect.top() + r as f32 * cell_h);
                let cell = egui::Rect::from_min_size(min_pt, egui::vec2(cell_w + 0.5, cell_h + 0.5));
                painter.rect_filled(cell, 0.0, to_colour32(charts::viridis(charts::heat_scale(*v, min, max))));
            }
        }
        if let Some(pos) = response.hover_pos() {
            if let Some((r, c)) = heat_cell_at(rect, pos, rows, HOURS_PER_DAY) {
                let labels = PriceTable::hour_labels();
                response.on_hover_text_at_pointer(format!(
                    "Day {}, {}: {:.2}",
                    r + 1,
                    labels[c],
                    table.rows()[r][c]
                ));
            }
        }
    }

    fn ui_histogram(ui: &mut egui::Ui, h: &Histogram) {
        let width = ui.available_width().max(200.0);
        let (rect, response) = ui.allocate_exact_size(egui::vec2(width, 200.0), egui::Sense::hover());
        let painter = ui.painter_at(rect);
        let visuals = ui.visuals();
        painter.rect_stroke(rect, 0.0, visuals.widgets.noninteractive.bg_stroke);
        let max = h.max_count().max(1) as f32;
        let bar_w = rect.width() / h.counts.len().max(1) as f32;
        for (i, count) in h.counts.iter().enumerate() {
            let bar_h = *count as f32 / max * (rect.height() - 16.0);
            let bar = egui::Rect::from_min_max(
                egui::pos2(rect.left() + i as f32 * bar_w + 1.0, rect.bottom() - bar_h),
                egui::pos2(rect.left() + (i + 1) as f32 * bar_w - 1.0, rect.bottom()),
            );
            painter.rect_filled(bar, 0.0, SLICE_COLOURS[0]);
        }
        if let Some(pos) = response.hover_pos() {
            let i = ((pos.x - rect.left()) / bar_w) as usize;
            if let Some((lo, hi, count)) = h.bins().nth(i) {
                response.on_hover_text_at_pointer(format!("{lo:.2} – {hi:.2}: {count}"));
            }
        }
    }

    fn ui_daily_chart(ui: &mut egui::Ui, daily: &[DailyStats], min: f64, max: f64) {
        let width = ui.available_width().max(200.0);
        let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 220.0), egui::Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_stroke(rect, 0.0, ui.visuals().widgets.noninteractive.bg_stroke);
        if daily.is_empty() {
            return;
        }
        let span = (max - min).max(f64::EPSILON);
        let n = (daily.len() - 1).max(1) as f32;
        let to_pos = |i: usize, v: f64| {
            egui::pos2(
                rect.left() + i as f32 / n * rect.width(),
                rect.bottom() - ((v - min) / span) as f32 * rect.height(),
            )
        };
        let series = |pick: fn(&DailyStats) -> f64| -> Vec<egui::Pos2> {
            daily.iter().enumerate().map(|(i, d)| to_pos(i, pick(d))).collect()
        };
        for (points, colour) in [
            (series(|d| d.min), MIN_COLOUR),
            (series(|d| d.max), MAX_COLOUR),
            (series(|d| d.mean), AVG_COLOUR),
        ] {
            painter.add(egui::Shape::line(points, egui::Stroke::new(1.5, colour)));
        }
    }

    fn ui_expense_pie(ui: &mut egui::Ui, expenses: &ExpenseMap) {
        let shares = charts::expense_shares(expenses);
        let (rect, _) = ui.allocate_exact_size(egui::vec2(220.0, 220.0), egui::Sense::hover());
        let painter = ui.painter_at(rect);
        let centre = rect.center();
        let radius = rect.width().min(rect.height()) / 2.0 - 4.0;
        let fractions: Vec<f64> = shares.iter().map(|(_, s)| *s).collect();
        for (i, (a0, a1)) in pie_angles(&fractions).into_iter().enumerate() {
            // 볼록 다각형만 그릴 수 있으므로 잘게 나눈 삼각형으로 채운다
            let steps = (((a1 - a0) / TAU) * 96.0).ceil().max(1.0) as usize;
            let colour = SLICE_COLOURS[i % SLICE_COLOURS.len()];
            for k in 0..steps {
                let t0 = a0 + (a1 - a0) * k as f32 / steps as f32;
                let t1 = a0 + (a1 - a0) * (k + 1) as f32 / steps as f32;
                let p0 = centre + radius * egui::vec2(t0.cos(), t0.sin());
                let p1 = centre + radius * egui::vec2(t1.cos(), t1.sin());
                painter.add(egui::Shape::convex_polygon(vec![centre, p0, p1], colour, egui::Stroke::NONE));
            }
        }
        for (i, (category, share)) in shares.iter().enumerate() {
            ui.horizontal(|ui| {
                let (swatch, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                ui.painter().rect_filled(swatch, 2.0, SLICE_COLOURS[i % SLICE_COLOURS.len()]);
                ui.label(format!(
                    "{}: {} ({})",
                    category.label(),
                    report::format_amount(expenses.get(*category)),
                    report::format_percent(share * 100.0)
                ));
            });
        }
    }

    fn ui_dashboard(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = move |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());

        let data = match &self.prices {
            Ok(data) => data,
            Err(msg) => {
                let msg = msg.clone();
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.colored_label(
                        ui.visuals().error_fg_color,
                        txt("gui.data.load_error", "Price data could not be loaded"),
                    );
                    ui.label(msg);
                    ui.horizontal(|ui| {
                        if ui.button(txt("gui.data.open", "Open CSV…")).clicked() {
                            self.pick_data_file();
                        }
                        if ui.button(txt("gui.data.reload", "Reload")).clicked() {
                            self.reload_prices();
                        }
                    });
                });
                return;
            }
        };

        let m = match &self.metrics {
            Some(Ok(m)) => m.clone(),
            Some(Err(e)) => {
                let msg = e.to_string();
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.colored_label(
                        ui.visuals().error_fg_color,
                        txt("gui.metrics.error", "Metrics could not be calculated"),
                    );
                    ui.label(msg);
                    if matches!(e, MetricsError::UnknownEngine(_)) {
                        ui.label(txt(
                            "gui.metrics.pick_engine",
                            "Choose an engine from the catalog in the configuration panel.",
                        ));
                    }
                });
                return;
            }
            None => return,
        };

        self.ui_metric_cards(ui, &m);
        ui.add_space(8.0);

        heading_with_tip(
            ui,
            &txt("gui.prices.heading", "Price Analysis"),
            &txt("gui.prices.tip", "Hourly prices from the loaded CSV"),
        );
        ui.label(txt("gui.prices.heatmap", "Hourly Price Heatmap"));
        Self::ui_heatmap(ui, &data.table, m.min_price, m.max_price);
        ui.horizontal(|ui| {
            ui.small(format!("Hour 00 … Hour {:02}", HOURS_PER_DAY - 1));
            ui.small(format!(
                "min {:.2}  max {:.2}  avg {:.2}",
                m.min_price, m.max_price, m.avg_price
            ));
        });
        ui.add_space(8.0);
        ui.label(txt("gui.prices.distribution", "Price Distribution"));
        Self::ui_histogram(ui, &data.histogram);
        ui.add_space(8.0);

        ui.heading(txt("gui.daily.heading", "Daily Statistics"));
        ui.horizontal(|ui| {
            ui.colored_label(MIN_COLOUR, txt("gui.daily.min", "Min Price"));
            ui.colored_label(MAX_COLOUR, txt("gui.daily.max", "Max Price"));
            ui.colored_label(AVG_COLOUR, txt("gui.daily.avg", "Average Price"));
        });
        Self::ui_daily_chart(ui, &data.daily, m.min_price, m.max_price);
        ui.add_space(8.0);

        ui.heading(txt("gui.summary.heading", "Financial Summary"));
        ui.columns(2, |cols| {
            cols[0].label(txt("gui.summary.expenses", "Monthly Expenses Distribution"));
            Self::ui_expense_pie(&mut cols[0], &self.scenario.expenses);
            cols[1].label(txt("gui.summary.metrics", "Key Financial Metrics"));
            egui::Grid::new("summary_table")
                .striped(true)
                .num_columns(2)
                .show(&mut cols[1], |ui| {
                    ui.strong(txt("gui.summary.metric", "Metric"));
                    ui.strong(txt("gui.summary.value", "Value"));
                    ui.end_row();
                    for (label, value) in report::headline_rows(&m) {
                        ui.label(label);
                        ui.label(value);
                        ui.end_row();
                    }
                });
        });
    }

    fn ui_settings(&mut self, ctx: &egui::Context) {
        let tr = self.tr.clone();
        let txt = move |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        let mut open = self.show_settings_modal;
        egui::Window::new(txt("gui.settings.title", "Settings"))
            .collapsible(false)
            .resizable(true)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(txt("gui.settings.lang", "Language"));
                egui::ComboBox::from_id_source("lang_choice")
                    .selected_text(self.lang_input.clone())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.lang_input, "auto".into(), txt("gui.settings.lang_auto", "System"));
                        ui.selectable_value(&mut self.lang_input, "en-us".into(), "English (US)");
                        ui.selectable_value(&mut self.lang_input, "ko-kr".into(), "한국어");
                    });
                ui.separator();
                ui.label(txt("gui.settings.ui_scale", "UI scale"));
                if ui.add(egui::Slider::new(&mut self.ui_scale, 0.8..=1.6).suffix(" x")).changed() {
                    ctx.set_pixels_per_point(self.ui_scale);
                }
                ui.label(txt("gui.settings.alpha", "Window transparency"));
                ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));
                ui.separator();
                ui.label(txt("gui.settings.font", "Font file (.ttf/.ttc)"));
                ui.horizontal(|ui| {
                    ui.text_edit_singleline(&mut self.custom_font_path);
                    if ui.button(txt("gui.settings.browse", "Browse…")).clicked() {
                        if let Some(p) = FileDialog::new().add_filter("Font", &["ttf", "ttc", "otf"]).pick_file() {
                            self.custom_font_path = p.display().to_string();
                        }
                    }
                    if ui.button(txt("gui.settings.font_load", "Load")).clicked() {
                        self.font_load_error = load_custom_font(ctx, &self.custom_font_path).err();
                    }
                });
                if let Some(e) = &self.font_load_error {
                    ui.colored_label(ui.visuals().error_fg_color, e);
                }
                ui.separator();
                if ui
                    .button(txt("gui.settings.save_scenario", "Save current scenario as defaults"))
                    .clicked()
                {
                    self.config.scenario = self.scenario.clone();
                    self.settings_status = Some(self.save_config(&txt("gui.settings.saved", "Saved.")));
                }
                if ui.button(txt("gui.settings.save", "Save settings")).clicked() {
                    self.config.language = self.lang_input.clone();
                    self.config.window_alpha = self.window_alpha;
                    let resolved = i18n::resolve_language("auto", Some(&self.config.language));
                    self.tr = i18n::Translator::new_with_pack(&resolved, self.config.language_pack_dir.as_deref());
                    self.settings_status = Some(self.save_config(&txt("gui.settings.saved", "Saved.")));
                }
                if let Some(msg) = &self.settings_status {
                    ui.label(msg);
                }
            });
        self.show_settings_modal = open;
    }

    fn save_config(&self, ok_msg: &str) -> String {
        match self.config.save() {
            Ok(()) => ok_msg.to_string(),
            Err(e) => {
                error!("{e}");
                format!("Save error: {e}")
            }
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.recompute_if_changed();

        let mut style = (*ctx.style()).clone();
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        let tr = self.tr.clone();
        let txt = move |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(txt("gui.nav.app_title", "⚡ Power Plant Economic Analysis Dashboard"));
                ui.separator();
                if ui.button(txt("gui.formula.button", "Formula reference")).clicked() {
                    self.show_formula_modal = true;
                }
                if ui.button(txt("gui.settings.title", "Settings")).clicked() {
                    self.show_settings_modal = true;
                }
                if ui.button(txt("gui.about.title", "Help / About")).clicked() {
                    self.show_help_modal = true;
                }
            });
        });

        if self.show_settings_modal {
            self.ui_settings(ctx);
        }

        if self.show_help_modal {
            egui::Window::new(txt("gui.about.title", "Help / About"))
                .collapsible(false)
                .resizable(true)
                .open(&mut self.show_help_modal)
                .show(ctx, |ui| {
                    ui.heading(txt("gui.about.app", "Economic analysis for gas-engine power plants"));
                    ui.label(format!("Version: {}", env!("CARGO_PKG_VERSION")));
                    ui.separator();
                    ui.label(txt("gui.about.data", "Price data: CSV with 24 hourly columns per day; a text header row is skipped."));
                    ui.label(txt("gui.about.config", "Defaults and the data path are stored in config.toml."));
                });
        }

        if self.show_formula_modal {
            egui::Window::new(txt("gui.formula.title", "Formula reference"))
                .collapsible(true)
                .resizable(true)
                .open(&mut self.show_formula_modal)
                .show(ctx, |ui| {
                    ui.label(txt("gui.formula.generation", "Generation = rated power × engines × load%/100"));
                    ui.label(txt("gui.formula.consumption", "Consumption = fuel rate × engines × load%/100"));
                    ui.label(format!(
                        "{} ({})",
                        txt("gui.formula.investment", "Investment = unit price × engines × overhead"),
                        metrics::INVESTMENT_OVERHEAD_FACTOR
                    ));
                    ui.separator();
                    ui.label(format!(
                        "{} ({})",
                        txt("gui.formula.annual", "Annual revenue = generation × average price × hours per year"),
                        metrics::HOURS_PER_YEAR
                    ));
                    ui.label(txt("gui.formula.monthly", "Monthly revenue = annual revenue / 12 − monthly expenses"));
                    ui.label(txt("gui.formula.roe", "ROE = annual revenue / investment × 100"));
                    ui.label(txt("gui.formula.roa", "ROA = annual revenue / (investment × 1.2) × 100"));
                    ui.label(txt("gui.formula.availability", "Availability = hours priced above the table minimum / all hours × 100"));
                });
        }

        egui::SidePanel::left("config_panel")
            .resizable(true)
            .min_width(220.0)
            .default_width(280.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| self.ui_sidebar(ui));
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| self.ui_dashboard(ui));
        });

        self.recompute_if_changed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn csv_with(rows: &[[f64; 24]]) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        let header: Vec<String> = (0..24).map(|h| format!("h{h}")).collect();
        writeln!(f, "{}", header.join(",")).unwrap();
        for row in rows {
            let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            writeln!(f, "{}", cells.join(",")).unwrap();
        }
        f
    }

    fn app_for(path: &Path) -> GuiApp {
        let cfg = config::Config {
            price_data_path: path.display().to_string(),
            ..config::Config::default()
        };
        GuiApp::new(cfg)
    }

    #[test]
    fn missing_price_file_shows_error_and_no_metrics() {
        let app = app_for(Path::new("/nonexistent/d24.csv"));
        assert!(app.prices.is_err());
        assert!(app.metrics.is_none());
    }

    #[test]
    fn metrics_follow_scenario_changes() {
        let file = csv_with(&[[10.0; 24]]);
        let mut app = app_for(file.path());
        app.scenario.engine = "DHA".into();
        app.recompute_if_changed();
        let first = app.metrics.clone().unwrap().unwrap();
        assert_eq!(first.generation_kw, 315.0);

        app.scenario.num_engines = 2;
        app.recompute_if_changed();
        let second = app.metrics.clone().unwrap().unwrap();
        assert_eq!(second.generation_kw, 630.0);
        assert_eq!(second.avg_price, first.avg_price);
    }

    #[test]
    fn unknown_configured_engine_is_reported_not_replaced() {
        let file = csv_with(&[[10.0; 24]]);
        let cfg = config::Config {
            price_data_path: file.path().display().to_string(),
            scenario: ScenarioInput {
                engine: "Retired model".into(),
                ..ScenarioInput::default()
            },
            ..config::Config::default()
        };
        let mut app = GuiApp::new(cfg);
        assert_eq!(app.scenario.engine, "Retired model");
        assert_eq!(
            app.metrics,
            Some(Err(MetricsError::UnknownEngine("Retired model".into())))
        );

        app.scenario.engine = "DHA".into();
        app.recompute_if_changed();
        assert!(matches!(app.metrics, Some(Ok(_))));
    }

    #[test]
    fn heat_cell_maps_corners() {
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(240.0, 100.0));
        assert_eq!(heat_cell_at(rect, egui::pos2(0.0, 0.0), 10, 24), Some((0, 0)));
        assert_eq!(heat_cell_at(rect, egui::pos2(240.0, 100.0), 10, 24), Some((9, 23)));
        assert_eq!(heat_cell_at(rect, egui::pos2(15.0, 25.0), 10, 24), Some((2, 1)));
        assert_eq!(heat_cell_at(rect, egui::pos2(300.0, 5.0), 10, 24), None);
    }

    #[test]
    fn pie_angles_cover_full_turn() {
        let angles = pie_angles(&[0.25, 0.25, 0.5]);
        assert_eq!(angles.len(), 3);
        let (first_start, _) = angles[0];
        let (_, last_end) = angles[2];
        assert!((last_end - first_start - TAU).abs() < 1e-5);
        assert!((angles[0].1 - angles[1].0).abs() < 1e-6);
    }
}
