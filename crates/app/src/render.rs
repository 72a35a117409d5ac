//! Plain-text rendering of the quiz for a terminal.

use std::io::{self, Write};

use services::SessionError;
use ui::{QuizVm, ResultVm};

/// Draw the current question.
///
/// The redraw runs under the transition guard so navigation cannot
/// interleave with it.
pub fn question(vm: &mut QuizVm, out: &mut impl Write) -> io::Result<()> {
    vm.begin_redraw();
    let drawn = draw_question(vm, out);
    vm.end_redraw();
    drawn
}

fn draw_question(vm: &QuizVm, out: &mut impl Write) -> io::Result<()> {
    let progress = vm.progress();
    writeln!(out)?;
    writeln!(out, "[{}] {}%", vm.progress_label(), progress.percent)?;
    writeln!(out, "{}", vm.prompt().unwrap_or_default())?;

    for row in vm.option_rows() {
        let mark = if row.selected { "(x)" } else { "( )" };
        writeln!(out, "  {} {mark} {}", row.key, row.label)?;
    }

    if let Some(input) = vm.input() {
        if let Some((title, text)) = &input.notice {
            writeln!(out, "  {title} {text}")?;
        }
        if let Some(help) = &input.help_text {
            writeln!(out, "  {help}")?;
        }
        let hint = input
            .value
            .as_deref()
            .or(input.placeholder.as_deref())
            .unwrap_or_default();
        writeln!(out, "  > {hint}")?;
    }

    let previous = if vm.has_previous() { "<  Anterior" } else { "" };
    writeln!(out, "{previous}    {}  >", vm.next_label())?;
    out.flush()
}

pub fn notice(out: &mut impl Write, message: &str) -> io::Result<()> {
    writeln!(out, "! {message}")?;
    out.flush()
}

pub fn blocked_message(err: SessionError) -> String {
    match err {
        SessionError::Unanswered { .. } => "Escolha uma resposta para continuar".to_string(),
        SessionError::AtFirstQuestion => "Esta é a primeira pergunta".to_string(),
        other => other.to_string(),
    }
}

pub fn result(out: &mut impl Write, result: &ResultVm) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Aumento potencial: {}", result.increase_label)?;
    writeln!(out, "Tamanho atual:     {}", result.current_size_label)?;
    writeln!(out, "Tamanho potencial: {}", result.potential_size_label)?;
    writeln!(out, "Taxa de sucesso:   {}", result.success_rate_label)?;
    writeln!(out, "Tempo necessário:  {}", result.time_required_label)?;
    writeln!(out, "Duração:           {}", result.program_duration_label)?;
    out.flush()
}
