//! 발전 엔진 카탈로그. 선택 가능한 엔진 3종의 정격 출력/연료 소비/단가를 고정으로 보관한다.

use crate::metrics::MetricsError;

/// 엔진 한 종의 사양.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSpec {
    /// 카탈로그 키(모델명)
    pub name: &'static str,
    /// 정격 출력 [kW]
    pub rated_power_kw: f64,
    /// 정격 부하에서의 연료 소비율
    pub fuel_consumption_rate: f64,
    /// 1기당 구매 단가
    pub unit_price: f64,
}

const BUILTIN_ENGINES: [EngineSpec; 3] = [
    EngineSpec {
        name: "Wärtsilä W16V25SG",
        rated_power_kw: 3000.0,
        fuel_consumption_rate: 777.0,
        unit_price: 6_000_000.0,
    },
    EngineSpec {
        name: "DHA",
        rated_power_kw: 315.0,
        fuel_consumption_rate: 84.0,
        unit_price: 2_000_000.0,
    },
    EngineSpec {
        name: "Jenbacher 612",
        rated_power_kw: 2200.0,
        fuel_consumption_rate: 444.30,
        unit_price: 5_000_000.0,
    },
];

/// 이름으로 조회하는 엔진 카탈로그. 프로세스 시작 시 한 번 만들고 변경하지 않는다.
#[derive(Debug, Clone)]
pub struct EngineCatalog {
    engines: Vec<EngineSpec>,
}

impl EngineCatalog {
    /// 내장 엔진 3종으로 카탈로그를 만든다.
    pub fn builtin() -> Self {
        Self {
            engines: BUILTIN_ENGINES.to_vec(),
        }
    }

    /// 모델명으로 사양을 찾는다. 없으면 `UnknownEngine` 오류.
    pub fn get(&self, name: &str) -> Result<&EngineSpec, MetricsError> {
        self.engines
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| MetricsError::UnknownEngine(name.to_string()))
    }

    /// 선택 위젯 표시 순서대로 순회한다.
    pub fn iter(&self) -> impl Iterator<Item = &EngineSpec> {
        self.engines.iter()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.engines.iter().map(|e| e.name).collect()
    }

    /// 기본 선택값(카탈로그 첫 항목).
    pub fn default_name(&self) -> &'static str {
        self.engines.first().map(|e| e.name).unwrap_or(BUILTIN_ENGINES[0].name)
    }
}

impl Default for EngineCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_keeps_display_order() {
        let catalog = EngineCatalog::builtin();
        assert_eq!(
            catalog.names(),
            vec!["Wärtsilä W16V25SG", "DHA", "Jenbacher 612"]
        );
        assert_eq!(catalog.default_name(), "Wärtsilä W16V25SG");
    }

    #[test]
    fn lookup_is_exact_match() {
        let catalog = EngineCatalog::builtin();
        assert_eq!(catalog.get("DHA").unwrap().rated_power_kw, 315.0);
        assert_eq!(
            catalog.get("dha"),
            Err(MetricsError::UnknownEngine("dha".into()))
        );
    }
}
