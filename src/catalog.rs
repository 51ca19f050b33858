//! Static variable catalog the frontend sidebar is built from: the survey
//! themes and the variables each theme groups, with display names and blurbs.

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    #[serde(rename = "variableCount")]
    pub variable_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Variable {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub theme: &'static str,
    #[serde(rename = "type")]
    pub chart: &'static str,
}

pub static THEMES: &[Theme] = &[
    Theme { id: "well-being", name: "Well-being (Core Focus)", variable_count: 7 },
    Theme { id: "socioeconomic", name: "Socio-economic Background", variable_count: 5 },
    Theme { id: "demographics", name: "Student Demographics", variable_count: 2 },
    Theme { id: "performance", name: "School Performance", variable_count: 3 },
];

pub static VARIABLES: &[Variable] = &[
    Variable {
        id: "BELONG",
        name: "Sense of belonging at school",
        description: "Measures students' feelings of acceptance and connectedness at school.",
        theme: "well-being",
        chart: "bar",
    },
    Variable {
        id: "BULLIED",
        name: "Exposure to bullying",
        description: "Measures students' experiences with different forms of bullying.",
        theme: "well-being",
        chart: "bar",
    },
    Variable {
        id: "FAMSUP",
        name: "Family support",
        description: "Measures the level of emotional support that students receive from their families.",
        theme: "well-being",
        chart: "bar",
    },
    Variable {
        id: "FEELSAFE",
        name: "Feeling safe at school",
        description: "Measures students' perceptions of safety within the school environment.",
        theme: "well-being",
        chart: "bar",
    },
    Variable {
        id: "ESCS",
        name: "Economic, Social and Cultural Status",
        description: "Composite index of family socioeconomic background.",
        theme: "socioeconomic",
        chart: "bar",
    },
    Variable {
        id: "PV1MATH",
        name: "Math Performance",
        description: "First plausible value of student performance in mathematics.",
        theme: "performance",
        chart: "bar",
    },
];

pub fn variable(id: &str) -> Option<&'static Variable> {
    VARIABLES.iter().find(|v| v.id == id)
}
