use actix::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::{debug, info, warn};

use crate::models::{AppState, Command, SnapshotFrame};
use crate::websocket::protocol::parse_frame;
use crate::websocket::sessions::SessionTicket;

/// One player connection. Holds its color for the lifetime of the socket and
/// only ever talks to the game through the controller.
pub struct PlayerSocket {
    app_state: web::Data<AppState>,
    session: Option<SessionTicket>,
}

impl PlayerSocket {
    pub fn new(app_state: web::Data<AppState>) -> Self {
        PlayerSocket {
            app_state,
            session: None,
        }
    }

    fn handle_text(&self, text: &str) {
        let Some(ticket) = self.session else {
            return;
        };
        match parse_frame(text) {
            Ok(Command::MovePiece(cmd)) => {
                debug!("{} submitted {:?}", ticket.color, cmd);
                self.app_state.controller.finish_turn(
                    ticket.color,
                    cmd.from_square(),
                    cmd.to_square(),
                );
            }
            Err(e) => warn!("Ignoring frame from {} ({}): {}", ticket.id, ticket.color, e),
        }
    }
}

impl Actor for PlayerSocket {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let transport = Box::new(ctx.address().recipient::<SnapshotFrame>());
        match self.app_state.sessions.connect(transport) {
            Ok(ticket) => {
                self.session = Some(ticket);
            }
            Err(e) => {
                warn!("Rejecting connection: {}", e);
                ctx.close(Some(ws::CloseReason {
                    code: ws::CloseCode::Policy,
                    description: Some(e.to_string()),
                }));
                ctx.stop();
            }
        }
    }

    fn stopping(&mut self, _: &mut Self::Context) -> Running {
        if let Some(ticket) = self.session.take() {
            self.app_state.sessions.disconnect(ticket);
        }
        Running::Stop
    }
}

impl Handler<SnapshotFrame> for PlayerSocket {
    type Result = ();

    fn handle(&mut self, msg: SnapshotFrame, ctx: &mut Self::Context) {
        ctx.text(&*msg.0);
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for PlayerSocket {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => self.handle_text(&text),
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Pong(_)) => {}
            Ok(ws::Message::Binary(_)) => {
                warn!("Binary messages are not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                info!("Connection closed: {:?}", reason);
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {}
            Err(e) => {
                warn!("WebSocket protocol error: {}", e);
                ctx.stop();
            }
        }
    }
}

/// WebSocket connection handler
pub async fn ws_index(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    debug!("New WebSocket connection request from {:?}", req.peer_addr());
    ws::start(PlayerSocket::new(app_state), &req, stream)
}
