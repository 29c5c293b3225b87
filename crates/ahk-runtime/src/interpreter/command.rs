//! Command execution

use crate::ast::{Command, CommandStmt, MsgBoxArgs};
use crate::context::ContextId;
use crate::error::{Error, RuntimeError};
use crate::interpreter::{Interpreter, Outcome};
use crate::msgbox::{clamp_timeout, MessageBoxRequest, DEFAULT_TEXT};

impl Interpreter {
    pub(super) fn eval_command(&mut self, command: &CommandStmt, ctx: ContextId) -> Result<Outcome, Error> {
        match &command.command {
            Command::MsgBox(args) => self.eval_msgbox(args, command, ctx),
        }
    }

    /// Show a message box, or in debug mode only describe it
    fn eval_msgbox(&mut self, args: &MsgBoxArgs, command: &CommandStmt, ctx: ContextId) -> Result<Outcome, Error> {
        let title = match &args.title {
            Some(expr) => self.eval_expr(expr, ctx)?.to_string(),
            None => self.default_title(),
        };
        let text = match &args.text {
            Some(expr) => self.eval_expr(expr, ctx)?.to_string(),
            None => DEFAULT_TEXT.to_string(),
        };
        let options = match &args.options {
            Some(literal) => literal.value.as_integer().unwrap_or(0),
            None => 0,
        };
        let timeout = args
            .timeout
            .as_ref()
            .map(|literal| clamp_timeout(literal.value.as_f64(), self.config.msgbox.max_timeout));

        let message = format!(
            "MsgBox with title: '{}' and text: '{}' is being displayed.",
            title, text
        );
        if self.debug() {
            self.echo(&message);
            return Ok(Outcome::Message(message));
        }

        let request = MessageBoxRequest {
            title,
            text,
            options,
            timeout,
        };
        log::debug!("showing message box with options {}", options);
        let status = self.renderer.show(&request);
        if status != 0 {
            let span = args.options.as_ref().map_or(command.span, |o| o.span);
            return Err(self.error(RuntimeError::UnsupportedMsgBoxOption { option: options }, span, ctx));
        }
        Ok(Outcome::Message(message))
    }

    fn default_title(&self) -> String {
        match &self.config.msgbox.default_title {
            Some(title) => title.clone(),
            None => self.contexts.source().name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::RuntimeError;
    use crate::interpreter::{Interpreter, Outcome};
    use crate::msgbox::{MessageBoxRequest, RecordingRenderer};
    use crate::parser::parse;
    use crate::span::SourceFile;
    use pretty_assertions::assert_eq;

    fn show(source: &str) -> (RecordingRenderer, Result<Vec<Outcome>, crate::error::Error>) {
        let program = parse(source, "script.ahk").unwrap();
        let mut interp = Interpreter::new(SourceFile::new("script.ahk", source));
        let recorder = RecordingRenderer::new();
        interp.set_renderer(Box::new(recorder.clone()));
        let result = interp.interpret(&program);
        (recorder, result)
    }

    #[test]
    fn test_defaults() {
        let (recorder, result) = show("MsgBox");
        result.unwrap();
        assert_eq!(
            recorder.requests(),
            vec![MessageBoxRequest {
                title: "script.ahk".into(),
                text: "Press OK to continue.".into(),
                options: 0,
                timeout: None,
            }]
        );
    }

    #[test]
    fn test_positional_arguments_with_interpolation() {
        let (recorder, result) = show("who := \"you\"\nMsgBox 4, Question, Is it %who%?, 3");
        result.unwrap();
        let request = &recorder.requests()[0];
        assert_eq!(request.options, 4);
        assert_eq!(request.title, "Question");
        assert_eq!(request.text, "Is it you?");
        assert_eq!(request.timeout, Some(3.0));
    }

    #[test]
    fn test_expression_text() {
        let (recorder, result) = show("MsgBox % 1 + 2");
        result.unwrap();
        assert_eq!(recorder.requests()[0].text, "3");
    }

    #[test]
    fn test_timeout_is_clamped() {
        let (recorder, result) = show("MsgBox 0, t, x, 99999999");
        result.unwrap();
        assert_eq!(recorder.requests()[0].timeout, Some(2_147_483.0));
    }

    #[test]
    fn test_unsupported_option() {
        let (_, result) = show("MsgBox 7, t, x");
        assert_eq!(
            result.unwrap_err().runtime_error(),
            Some(&RuntimeError::UnsupportedMsgBoxOption { option: 7 })
        );
    }

    #[test]
    fn test_debug_mode_skips_renderer() {
        let source = "MsgBox Hello";
        let program = parse(source, "script.ahk").unwrap();
        let mut interp = Interpreter::new(SourceFile::new("script.ahk", source));
        let recorder = RecordingRenderer::new();
        interp.set_renderer(Box::new(recorder.clone()));
        interp.set_debug(true);
        interp.interpret(&program).unwrap();

        assert!(recorder.requests().is_empty());
        assert_eq!(
            interp.take_echoes(),
            vec!["MsgBox with title: 'script.ahk' and text: 'Hello' is being displayed.".to_string()]
        );
    }
}
