// Interactive chat loop
//
// Owns one Conversation for the lifetime of the process. Each line is either
// a slash command or a message handed to the shared pipeline.

use anyhow::Result;
use chrono::Local;
use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::Arc;

use super::commands::{format_help, Command};
use super::input::InputHandler;
use super::render::{reply_footer, reply_text};
use crate::conversation::{Conversation, Message};
use crate::pipeline::{ResponseOrchestrator, ResponseResult};
use crate::resources::{self, DISCLAIMER, WELCOME};

pub struct ChatRepl {
    orchestrator: Arc<ResponseOrchestrator>,
    conversation: Conversation,
    input_handler: Option<InputHandler>,
}

impl ChatRepl {
    pub fn new(orchestrator: Arc<ResponseOrchestrator>) -> Self {
        let input_handler = if io::stdin().is_terminal() {
            match InputHandler::new() {
                Ok(handler) => Some(handler),
                Err(e) => {
                    tracing::warn!("Failed to initialize input handler: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Self {
            orchestrator,
            conversation: Conversation::new(),
            input_handler,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub async fn run(mut self) -> Result<()> {
        println!("{}\n", WELCOME);
        if !self.orchestrator.is_ai_enabled() {
            println!("(Running in rule-based mode. Set HF_TOKEN to enable AI replies.)\n");
        }
        println!("Type /help for commands, /quit to leave.\n");

        loop {
            let Some(line) = self.read_line()? else {
                break;
            };

            if line.is_empty() {
                continue;
            }

            if line.starts_with('/') {
                match Command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => self.handle_command(command).await,
                    Err(message) => println!("{}\n", message),
                }
                continue;
            }

            self.send(&line).await;
        }

        if let Some(handler) = &mut self.input_handler {
            if let Err(e) = handler.save_history() {
                tracing::warn!("Failed to save history: {}", e);
            }
        }

        println!("\n{}", DISCLAIMER);
        println!("\nTake care of yourself. Goodbye!");
        Ok(())
    }

    /// `Ok(None)` on EOF or Ctrl+C
    fn read_line(&mut self) -> Result<Option<String>> {
        match &mut self.input_handler {
            Some(handler) => handler.read_line("you> "),
            None => {
                print!("you> ");
                io::stdout().flush()?;
                let mut line = String::new();
                if io::stdin().lock().read_line(&mut line)? == 0 {
                    return Ok(None);
                }
                Ok(Some(line.trim().to_string()))
            }
        }
    }

    async fn handle_command(&mut self, command: Command) {
        match command {
            Command::Help => println!("{}\n", format_help()),
            Command::Resources => {
                println!("{}\n", resources::resources_text(self.orchestrator.region()))
            }
            Command::Tips => println!("{}\n", resources::self_care_text()),
            Command::Reset => {
                self.conversation.reset();
                println!("Conversation cleared. Let's start fresh.\n");
                println!("{}\n", WELCOME);
            }
            Command::Quick(quick) => {
                println!("you> {}", quick.prompt());
                self.send(quick.prompt()).await;
            }
            Command::Quit => {}
        }
    }

    /// Run one turn through the pipeline and print the reply
    pub async fn send(&mut self, text: &str) -> ResponseResult {
        let result = self
            .orchestrator
            .process(text, self.conversation.messages())
            .await;

        let user = Message::user(text).with_emotions(self.orchestrator.detect_emotions(text));
        self.conversation.record_turn(user, &result);

        println!("\nsafespace> {}", reply_text(&result));
        println!("           {}\n", reply_footer(&result, Local::now()));
        result
    }
}
