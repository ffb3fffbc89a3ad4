//! 산정 결과 보고서: 연락처 검증, 요약문, JSON 페이로드, 차트 데이터.
//! 메일 발송과 PDF 생성은 외부 서비스 몫이고 여기서는 내보낼 데이터만 만든다.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::estimation::{EstimationResult, ProjectionSeries};

pub const CURRENCY_SYMBOL: &str = "₹";

pub const CHART_TITLE: &str = "25-Year Grid vs Solar Net Cost (with Payback Highlight)";

/// 보고서를 받을 사람.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// 설치 위치. 모르면 None.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Location {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let part = |v: Option<f64>| v.map_or_else(|| "N/A".to_string(), |x| x.to_string());
        write!(f, "{}, {}", part(self.lat), part(self.lon))
    }
}

/// 보고서 사본을 받는 설치업체.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Installer {
    pub name: &'static str,
    pub email: &'static str,
}

pub const INSTALLERS: [Installer; 3] = [
    Installer {
        name: "SunGrid Pvt Ltd",
        email: "sungrid@example.com",
    },
    Installer {
        name: "BrightWatts Solutions",
        email: "brightwatts@example.com",
    },
    Installer {
        name: "SolarCraft India",
        email: "solarcraft@example.com",
    },
];

/// 이름으로 설치업체를 찾는다(대소문자 무시).
pub fn find_installer(name: &str) -> Option<Installer> {
    let name = name.trim();
    INSTALLERS
        .iter()
        .copied()
        .find(|i| i.name.eq_ignore_ascii_case(name))
}

#[derive(Debug)]
pub enum ReportError {
    /// 이메일 미입력
    MissingEmail,
    /// 산정 결과 없음
    NoEstimation,
    /// 목록에 없는 설치업체
    UnknownInstaller(String),
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// JSON 직렬화 오류
    Json(serde_json::Error),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::MissingEmail => write!(f, "이메일을 입력하세요."),
            ReportError::NoEstimation => write!(f, "먼저 산정을 수행하세요."),
            ReportError::UnknownInstaller(name) => write!(f, "알 수 없는 설치업체: {name}"),
            ReportError::Io(e) => write!(f, "보고서 저장 오류: {e}"),
            ReportError::Json(e) => write!(f, "보고서 직렬화 오류: {e}"),
        }
    }
}

impl std::error::Error for ReportError {}

impl From<std::io::Error> for ReportError {
    fn from(value: std::io::Error) -> Self {
        ReportError::Io(value)
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(value: serde_json::Error) -> Self {
        ReportError::Json(value)
    }
}

/// 검증을 통과한 보고서.
#[derive(Debug, Clone)]
pub struct Report {
    pub contact: Contact,
    pub installer: Installer,
    pub location: Location,
    pub sun_hours: f64,
    pub result: EstimationResult,
    pub projection: ProjectionSeries,
}

/// 웹훅/메일 서비스로 넘기는 JSON 본문.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload<'a> {
    #[serde(flatten)]
    pub contact: &'a Contact,
    pub location: Location,
    pub sun_hours: f64,
    pub installer: Installer,
    pub results: &'a EstimationResult,
}

#[derive(Debug, Serialize)]
pub struct ChartDataset {
    pub label: &'static str,
    pub data: Vec<f64>,
}

/// 외부 차트 렌더러에 넘기는 데이터 전용 표현.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub title: &'static str,
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
    /// 회수 연차 라벨. 기간 내 회수가 없으면 null.
    pub payback_label: Option<String>,
}

impl ChartData {
    pub fn from_projection(projection: &ProjectionSeries) -> Self {
        Self {
            title: CHART_TITLE,
            labels: projection.labels(),
            datasets: vec![
                ChartDataset {
                    label: "Cumulative Grid Cost (₹)",
                    data: projection.cumulative_grid_cost.clone(),
                },
                ChartDataset {
                    label: "Cumulative Solar Net Cost (₹)",
                    data: projection.cumulative_net_solar_cost.clone(),
                },
            ],
            payback_label: projection.payback_year().map(|y| format!("Year {y}")),
        }
    }
}

/// 요약문 서식.
struct Summary<'a>(&'a Report);

impl std::fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let report = self.0;
        let r = &report.result;
        let c = CURRENCY_SYMBOL;
        writeln!(f, "Hello {},", report.contact.name)?;
        writeln!(f)?;
        writeln!(f, "Here is your solar estimation summary:")?;
        writeln!(f)?;
        writeln!(f, "System Size: {} kW", r.required_kw)?;
        writeln!(f, "Area Needed: {} m²", r.area_m2)?;
        writeln!(f, "Area Comment: {}", r.area_comment.as_str())?;
        writeln!(f, "Estimated Cost: {c}{}", r.cost)?;
        writeln!(f, "Monthly Grid Bill: {c}{}", r.monthly_grid_bill)?;
        writeln!(f, "Monthly Savings: {c}{}", r.monthly_savings)?;
        writeln!(f, "Payback Period: {} years", r.payback_years)?;
        writeln!(f, "Battery Size Needed: {} kWh", r.battery_kwh)?;
        writeln!(f, "150Ah Batteries Needed: {}", r.battery_count)?;
        if let Some(year) = report.projection.payback_year() {
            writeln!(f, "Projected Payback: Year {year}")?;
        }
        writeln!(f)?;
        writeln!(f, "Location: {}", report.location)?;
        writeln!(f, "Sun Hours Used: {} hours/day", report.sun_hours)?;
        writeln!(f, "Installer: {} <{}>", report.installer.name, report.installer.email)?;
        writeln!(f)?;
        writeln!(f, "Thank you for using Sun4sure!")
    }
}

/// 내보낸 파일 경로.
#[derive(Debug, Clone)]
pub struct ExportedReport {
    pub summary: PathBuf,
    pub payload: PathBuf,
    pub chart: PathBuf,
}

impl Report {
    /// 연락처와 산정 결과를 검증해 보고서를 만든다.
    pub fn prepare(
        contact: Contact,
        installer: Installer,
        location: Location,
        sun_hours: f64,
        result: Option<&EstimationResult>,
        projection: Option<&ProjectionSeries>,
    ) -> Result<Self, ReportError> {
        if contact.email.trim().is_empty() {
            return Err(ReportError::MissingEmail);
        }
        let (result, projection) = match (result, projection) {
            (Some(r), Some(p)) if r.required_kw > 0.0 => (r.clone(), p.clone()),
            _ => return Err(ReportError::NoEstimation),
        };
        Ok(Self {
            contact,
            installer,
            location,
            sun_hours,
            result,
            projection,
        })
    }

    /// 메일 본문으로 쓰는 요약문.
    pub fn summary_text(&self) -> String {
        Summary(self).to_string()
    }

    pub fn payload(&self) -> ReportPayload<'_> {
        ReportPayload {
            contact: &self.contact,
            location: self.location,
            sun_hours: self.sun_hours,
            installer: self.installer,
            results: &self.result,
        }
    }

    pub fn chart(&self) -> ChartData {
        ChartData::from_projection(&self.projection)
    }

    /// report.txt, report.json, chart.json을 디렉터리에 쓴다.
    pub fn write_to_dir(&self, dir: &Path) -> Result<ExportedReport, ReportError> {
        fs::create_dir_all(dir)?;
        let exported = ExportedReport {
            summary: dir.join("report.txt"),
            payload: dir.join("report.json"),
            chart: dir.join("chart.json"),
        };
        fs::write(&exported.summary, self.summary_text())?;
        fs::write(
            &exported.payload,
            serde_json::to_string_pretty(&self.payload())?,
        )?;
        fs::write(&exported.chart, serde_json::to_string_pretty(&self.chart())?)?;
        info!(dir = %dir.display(), email = %self.contact.email, "exported report");
        Ok(exported)
    }
}
