use std::io::{self, BufRead, Write};

use crate::app::AppError;
use crate::charts::{self, Histogram};
use crate::config::Config;
use crate::engine::EngineCatalog;
use crate::expenses::{ExpenseCategory, ExpenseMap};
use crate::i18n::{keys, Translator};
use crate::metrics::{MetricsResult, ScenarioInput};
use crate::price_table::PriceTable;
use crate::report::{format_amount, format_percent, headline_rows, metric_cards};

/// 터미널 히스토그램 구간 수.
const CLI_HISTOGRAM_BINS: usize = 10;
const CLI_HISTOGRAM_WIDTH: usize = 40;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Scenario,
    Metrics,
    Prices,
    Expenses,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다. 입력이 끝나면 `Exit`.
pub fn main_menu(tr: &Translator, input: &mut impl BufRead) -> Result<MenuChoice, AppError> {
    for key in [
        keys::MAIN_MENU_TITLE,
        keys::MAIN_MENU_SCENARIO,
        keys::MAIN_MENU_METRICS,
        keys::MAIN_MENU_PRICES,
        keys::MAIN_MENU_EXPENSES,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let Some(sel) = read_line(input, &tr.t(keys::PROMPT_MENU_SELECT))? else {
            return Ok(MenuChoice::Exit);
        };
        if let Some(choice) = parse_menu_choice(&sel) {
            return Ok(choice);
        }
        println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
    }
}

fn parse_menu_choice(s: &str) -> Option<MenuChoice> {
    match s.trim() {
        "1" => Some(MenuChoice::Scenario),
        "2" => Some(MenuChoice::Metrics),
        "3" => Some(MenuChoice::Prices),
        "4" => Some(MenuChoice::Expenses),
        "5" => Some(MenuChoice::Settings),
        "0" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// 시나리오(엔진, 대수, 부하율, 가스 단가)를 편집한다. 빈 입력은 현재 값을 유지한다.
pub fn handle_scenario(
    tr: &Translator,
    engines: &EngineCatalog,
    scenario: &mut ScenarioInput,
    input: &mut impl BufRead,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SCENARIO_HEADING));
    println!("{}", tr.t(keys::PROMPT_KEEP_CURRENT));

    println!("{}:", tr.t(keys::SCENARIO_ENGINE));
    for (i, e) in engines.iter().enumerate() {
        let marker = if e.name == scenario.engine { "*" } else { " " };
        println!(
            "{marker}{}) {} ({} kW, {})",
            i + 1,
            e.name,
            e.rated_power_kw,
            format_amount(e.unit_price)
        );
    }
    let names = engines.names();
    loop {
        let Some(sel) = read_line(input, &tr.t(keys::PROMPT_SELECT))? else {
            break;
        };
        let sel = sel.trim();
        if sel.is_empty() {
            break;
        }
        match sel.parse::<usize>().ok().and_then(|n| names.get(n.wrapping_sub(1))) {
            Some(name) => {
                scenario.engine = (*name).to_string();
                break;
            }
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }

    if let Some(n) = read_optional_f64(&format!(
        "{} [{}]: ",
        tr.t(keys::SCENARIO_NUM_ENGINES),
        scenario.num_engines
    ), tr, input)?
    {
        scenario.num_engines = n.round().max(1.0) as u32;
    }
    if let Some(load) = read_optional_f64(&format!(
        "{} [{}]: ",
        tr.t(keys::SCENARIO_LOAD),
        scenario.load_percentage
    ), tr, input)?
    {
        scenario.load_percentage = load.clamp(0.0, 100.0);
    }
    if let Some(gas) = read_optional_f64(&format!(
        "{} [{}]: ",
        tr.t(keys::SCENARIO_GAS_PRICE),
        scenario.gas_price
    ), tr, input)?
    {
        scenario.gas_price = gas.max(0.0);
    }
    print_scenario(tr, scenario);
    Ok(())
}

/// 월간 운영비 항목을 하나씩 편집한다.
pub fn handle_expenses(
    tr: &Translator,
    expenses: &mut ExpenseMap,
    input: &mut impl BufRead,
) -> Result<(), AppError> {
    print_expenses(tr, expenses);
    println!("{}", tr.t(keys::PROMPT_KEEP_CURRENT));
    for category in ExpenseCategory::ALL {
        let prompt = format!("{} [{}]: ", category.label(), expenses.get(category));
        if let Some(v) = read_optional_f64(&prompt, tr, input)? {
            expenses.set(category, v);
        }
    }
    print_expenses(tr, expenses);
    Ok(())
}

/// 언어 설정을 바꾼다. 변경되었으면 true.
pub fn handle_settings(
    tr: &Translator,
    cfg: &mut Config,
    input: &mut impl BufRead,
) -> Result<bool, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{}: {}", tr.t(keys::SETTINGS_CURRENT_LANGUAGE), cfg.language);
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(input, &tr.t(keys::PROMPT_SELECT))?.unwrap_or_default();
    let lang = match sel.trim() {
        "" => return Ok(false),
        "1" => "auto",
        "2" => "en-us",
        "3" => "ko-kr",
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(false);
        }
    };
    cfg.language = lang.to_string();
    Ok(true)
}

pub fn print_scenario(tr: &Translator, s: &ScenarioInput) {
    println!("{}", tr.t(keys::SCENARIO_HEADING));
    println!("{}: {}", tr.t(keys::SCENARIO_ENGINE), s.engine);
    println!("{}: {}", tr.t(keys::SCENARIO_NUM_ENGINES), s.num_engines);
    println!("{}: {:.0}", tr.t(keys::SCENARIO_LOAD), s.load_percentage);
    println!("{}: {:.2}", tr.t(keys::SCENARIO_GAS_PRICE), s.gas_price);
}

pub fn print_metrics(tr: &Translator, m: &MetricsResult) {
    println!("{}", tr.t(keys::METRICS_HEADING));
    for (label, value) in metric_cards(m) {
        println!("{label:<20} {value:>20}");
    }
    println!(
        "{:<20} {:>20}",
        tr.t(keys::METRICS_CONSUMPTION),
        format_amount(m.consumption_rate)
    );
    println!(
        "{:<20} {:>20}",
        tr.t(keys::METRICS_ANNUAL_REVENUE),
        format_amount(m.annual_revenue)
    );
}

pub fn print_headline(tr: &Translator, m: &MetricsResult) {
    println!("{}", tr.t(keys::METRICS_SUMMARY));
    println!("| {:<20} | {:>20} |", "Metric", "Value");
    println!("|{:-<22}|{:->22}|", "", "");
    for (label, value) in headline_rows(m) {
        println!("| {label:<20} | {value:>20} |");
    }
}

pub fn print_prices(tr: &Translator, prices: &PriceTable, m: &MetricsResult) {
    println!("{}", tr.t(keys::PRICES_HEADING));
    println!(
        "{}: {} x {}",
        tr.t(keys::PRICES_SHAPE),
        prices.num_days(),
        PriceTable::hour_labels().len()
    );
    println!(
        "{}: {:.2} / {:.2} / {:.2}",
        tr.t(keys::PRICES_MIN_MAX_AVG),
        m.min_price,
        m.max_price,
        m.avg_price
    );
    println!("{}:", tr.t(keys::PRICES_HISTOGRAM));
    for line in histogram_lines(&Histogram::from_values(prices.cells(), CLI_HISTOGRAM_BINS)) {
        println!("{line}");
    }
}

pub fn print_expenses(tr: &Translator, expenses: &ExpenseMap) {
    println!("{}", tr.t(keys::EXPENSES_HEADING));
    for (category, share) in charts::expense_shares(expenses) {
        println!(
            "{:<20} {:>14} {:>8}",
            category.label(),
            format_amount(expenses.get(category)),
            format_percent(share * 100.0)
        );
    }
    println!(
        "{:<20} {:>14}",
        tr.t(keys::EXPENSES_TOTAL),
        format_amount(expenses.total())
    );
}

/// 구간마다 "[lo, hi) ####  n" 한 줄.
fn histogram_lines(h: &Histogram) -> Vec<String> {
    let max = h.max_count().max(1);
    h.bins()
        .map(|(lo, hi, count)| {
            let bar = "#".repeat(count * CLI_HISTOGRAM_WIDTH / max);
            format!("{lo:>10.2} - {hi:<10.2} {bar:<width$} {count}", width = CLI_HISTOGRAM_WIDTH)
        })
        .collect()
}

/// 프롬프트를 출력하고 한 줄을 읽는다. 입력이 끝났으면 None.
fn read_line(input: &mut impl BufRead, prompt: &str) -> Result<Option<String>, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf))
}

/// 빈 입력이나 입력 끝이면 None, 유한한 숫자가 아니면 다시 묻는다.
fn read_optional_f64(
    prompt: &str,
    tr: &Translator,
    input: &mut impl BufRead,
) -> Result<Option<f64>, AppError> {
    while let Some(line) = read_line(input, prompt)? {
        let s = line.trim();
        if s.is_empty() {
            return Ok(None);
        }
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() => return Ok(Some(v)),
            _ => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_numbers_map_to_choices() {
        assert_eq!(parse_menu_choice(" 2\n"), Some(MenuChoice::Metrics));
        assert_eq!(parse_menu_choice("0"), Some(MenuChoice::Exit));
        assert_eq!(parse_menu_choice("9"), None);
    }

    #[test]
    fn histogram_bars_scale_to_largest_bin() {
        let h = Histogram::from_values([1.0, 2.0, 2.0, 2.0], 2);
        let lines = histogram_lines(&h);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains(&"#".repeat(CLI_HISTOGRAM_WIDTH)));
        assert!(lines[1].ends_with(" 3"));
    }

    #[test]
    fn closed_input_leaves_menu() {
        let tr = Translator::new("en-us");
        let mut input: &[u8] = b"";
        assert_eq!(main_menu(&tr, &mut input).unwrap(), MenuChoice::Exit);
        let mut input: &[u8] = b"7\n";
        assert_eq!(main_menu(&tr, &mut input).unwrap(), MenuChoice::Exit);
        let mut input: &[u8] = b"7\n3\n";
        assert_eq!(main_menu(&tr, &mut input).unwrap(), MenuChoice::Prices);
    }

    #[test]
    fn number_prompt_skips_non_finite_values() {
        let tr = Translator::new("en-us");
        let mut input: &[u8] = b"NaN\ninf\nabc\n42.5\n";
        assert_eq!(read_optional_f64("> ", &tr, &mut input).unwrap(), Some(42.5));
        let mut input: &[u8] = b"NaN\n";
        assert_eq!(read_optional_f64("> ", &tr, &mut input).unwrap(), None);
        let mut input: &[u8] = b"\n9\n";
        assert_eq!(read_optional_f64("> ", &tr, &mut input).unwrap(), None);
    }

    #[test]
    fn scenario_editor_keeps_values_at_end_of_input() {
        let tr = Translator::new("en-us");
        let mut scenario = ScenarioInput::default();
        let mut input: &[u8] = b"2\n4\nNaN\n80\n";
        handle_scenario(&tr, &EngineCatalog::builtin(), &mut scenario, &mut input).unwrap();
        assert_eq!(scenario.engine, "DHA");
        assert_eq!(scenario.num_engines, 4);
        assert_eq!(scenario.load_percentage, 80.0);
        assert_eq!(scenario.gas_price, 1.0);
    }
}
