use super::config::Language;

/// Internationalization support for UI text
pub struct I18n {
    language: Language,
}

impl I18n {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Translate a UI key, falling back to the key itself
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        let text = match self.language {
            Language::Spanish => spanish(key),
            Language::English => english(key),
        };
        text.unwrap_or(key)
    }
}

fn spanish(key: &str) -> Option<&'static str> {
    let text = match key {
        // Header
        "app.title" => "Tablero de Proyectos",
        "subtitle.dashboard" => "Performance Metrics & KPIs",
        "subtitle.database" => "Registro completo de todas las tareas",
        "header.records" => "registros",
        "header.loaded" => "Cargado",
        "header.loading" => "Cargando datos...",

        // Navigation
        "nav.title" => "Navegación",
        "nav.overview" => "Vista General",
        "nav.database" => "Base de Datos",
        "nav.overview_short" => "General",
        "nav.database_short" => "Datos",
        "quarter.title" => "Periodo",
        "quarter.all" => "Todos",

        // KPIs
        "kpi.total" => "Total Proyectos",
        "kpi.hours" => "Horas Estimadas",
        "kpi.avg" => "Promedio",
        "kpi.avg_unit" => "h/proy",
        "kpi.done" => "Completados",
        "kpi.wip" => "En Progreso",

        // Charts
        "chart.status_by_team" => "Estado por Equipo",
        "chart.current_status" => "Estado Actual",
        "chart.composition" => "Composición",
        "chart.nuevos" => "Nuevos",
        "chart.mejoras" => "Mejoras",
        "chart.radar" => "Volumen vs Esfuerzo",
        "chart.volume" => "Volumen",
        "chart.effort" => "Esfuerzo",
        "chart.no_data" => "Sin datos",

        // Table
        "table.name" => "Nombre",
        "table.date" => "Fecha",
        "table.team" => "Equipo",
        "table.quarter" => "Q",
        "table.status" => "Estado",
        "table.type" => "Tipo",
        "table.hours" => "Horas",
        "table.empty" => "Sin registros para este filtro",

        // Errors
        "error.title" => "Error cargando datos",
        "error.hint" => "Asegúrate de que data.csv esté en la carpeta o usa --source",
        "error.retry" => "Pulsa r para reintentar",

        // Status messages
        "status.reloaded" => "Datos recargados",
        "status.reload_failed" => "Error al recargar",
        "status.theme" => "Tema",
        "status.language" => "Idioma: Español",

        // Controls
        "controls.navigation" => "Navegar:",
        "controls.quarter" => "Periodo:",
        "controls.pages" => "Páginas:",
        "controls.theme" => "Tema:",
        "controls.language" => "Idioma:",
        "controls.sidebar" => "Menú:",
        "controls.reload" => "recargar",
        "controls.help" => "Ayuda:",
        "controls.quit" => "salir",

        // Help overlay
        "help.title" => "Ayuda",
        "help.views.title" => "Vistas",
        "help.views.line1" => "• Vista General: KPIs, estado por equipo y radar",
        "help.views.line2" => "• Equipo: las mismas métricas para un solo equipo",
        "help.views.line3" => "• Base de Datos: tabla de registros filtrados",
        "help.keys.title" => "Teclas",
        "help.keys.line1" => "j/k ↑↓  cambiar de página      g/d  general / base de datos",
        "help.keys.line2" => "a/0  todo el año      1-4  trimestre      Tab  siguiente periodo",
        "help.keys.line3" => "PgUp/PgDn  desplazar tabla      b  contraer menú",
        "help.keys.line4" => "r  recargar      t  tema      l  idioma      q/Esc  salir",
        "help.data.title" => "Datos",
        "help.data.line1" => "• Horas: semanas x40, días x8, horas x1; vacío o ilegible = 4",
        "help.data.line2" => "• Trimestre según el mes (ene..dic) de la fecha dd/mmm/aaaa",
        "help.data.line3" => "• Radar: volumen y esfuerzo normalizados a 0-100",

        _ => return None,
    };
    Some(text)
}

fn english(key: &str) -> Option<&'static str> {
    let text = match key {
        // Header
        "app.title" => "Project Dashboard",
        "subtitle.dashboard" => "Performance Metrics & KPIs",
        "subtitle.database" => "Complete record of every task",
        "header.records" => "records",
        "header.loaded" => "Loaded",
        "header.loading" => "Loading data...",

        // Navigation
        "nav.title" => "Navigation",
        "nav.overview" => "Overview",
        "nav.database" => "Database",
        "nav.overview_short" => "Overview",
        "nav.database_short" => "Data",
        "quarter.title" => "Period",
        "quarter.all" => "All",

        // KPIs
        "kpi.total" => "Total Projects",
        "kpi.hours" => "Estimated Hours",
        "kpi.avg" => "Average",
        "kpi.avg_unit" => "h/proj",
        "kpi.done" => "Done",
        "kpi.wip" => "In Progress",

        // Charts
        "chart.status_by_team" => "Status by Team",
        "chart.current_status" => "Current Status",
        "chart.composition" => "Composition",
        "chart.nuevos" => "New",
        "chart.mejoras" => "Improvements",
        "chart.radar" => "Volume vs Effort",
        "chart.volume" => "Volume",
        "chart.effort" => "Effort",
        "chart.no_data" => "No data",

        // Table
        "table.name" => "Name",
        "table.date" => "Date",
        "table.team" => "Team",
        "table.quarter" => "Q",
        "table.status" => "Status",
        "table.type" => "Type",
        "table.hours" => "Hours",
        "table.empty" => "No records match this filter",

        // Errors
        "error.title" => "Error loading data",
        "error.hint" => "Make sure data.csv is in the folder or pass --source",
        "error.retry" => "Press r to retry",

        // Status messages
        "status.reloaded" => "Data reloaded",
        "status.reload_failed" => "Reload failed",
        "status.theme" => "Theme",
        "status.language" => "Language: English",

        // Controls
        "controls.navigation" => "Navigate:",
        "controls.quarter" => "Period:",
        "controls.pages" => "Pages:",
        "controls.theme" => "Theme:",
        "controls.language" => "Language:",
        "controls.sidebar" => "Menu:",
        "controls.reload" => "reload",
        "controls.help" => "Help:",
        "controls.quit" => "quit",

        // Help overlay
        "help.title" => "Help",
        "help.views.title" => "Views",
        "help.views.line1" => "• Overview: KPIs, status by team and radar",
        "help.views.line2" => "• Team: the same metrics for a single team",
        "help.views.line3" => "• Database: table of the filtered records",
        "help.keys.title" => "Keys",
        "help.keys.line1" => "j/k ↑↓  change page      g/d  overview / database",
        "help.keys.line2" => "a/0  whole year      1-4  quarter      Tab  next period",
        "help.keys.line3" => "PgUp/PgDn  scroll table      b  collapse menu",
        "help.keys.line4" => "r  reload      t  theme      l  language      q/Esc  quit",
        "help.data.title" => "Data",
        "help.data.line1" => "• Hours: weeks x40, days x8, hours x1; empty or unreadable = 4",
        "help.data.line2" => "• Quarter from the month (ene..dic) of the dd/mmm/yyyy date",
        "help.data.line3" => "• Radar: volume and effort normalized to 0-100",

        _ => return None,
    };
    Some(text)
}
