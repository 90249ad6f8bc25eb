//! Per-connection handler and request dispatch — the protocol front door.
//!
//! Each accepted connection runs this loop in its own task: receive one
//! frame, decode one request, dispatch, send one response. The handler is
//! stateless per request; every decision is made against [`LobbyState`].

use std::sync::Arc;

use parlor_protocol::{Body, Codec, ErrorCode, Request, Response};
use parlor_room::RoomError;
use parlor_transport::{Connection, WsConnection};

use crate::server::LobbyState;
use crate::LobbyError;

/// Handles one connection from accept to close.
///
/// Undecodable frames are dropped and the connection continues; well-formed
/// JSON that is not a known request gets a `BAD_REQUEST` answer. Nothing a
/// client sends tears the connection down.
pub(crate) async fn handle_connection(
    conn: WsConnection,
    state: Arc<LobbyState>,
) -> Result<(), LobbyError> {
    let conn_id = conn.id();
    tracing::debug!(%conn_id, "handling new connection");

    loop {
        let data = match conn.recv().await {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::debug!(%conn_id, "connection closed cleanly");
                break;
            }
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "recv error");
                break;
            }
        };

        let value: serde_json::Value = match state.codec.decode(&data) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "dropping undecodable frame");
                continue;
            }
        };

        let response = match serde_json::from_value::<Request>(value) {
            Ok(request) => dispatch(&state, request).await,
            Err(e) => Response::error(ErrorCode::BadRequest, format!("unknown request: {e}")),
        };

        let bytes = state.codec.encode(&response)?;
        conn.send(&bytes).await?;
    }

    Ok(())
}

/// Turns one request into one response against the shared state.
pub async fn dispatch(state: &LobbyState, request: Request) -> Response {
    match request {
        // -- Accounts & presence ------------------------------------------
        Request::PlayerRegister { name, password } => {
            match state.sessions.register(&name, &password).await {
                Ok(()) => Response::message("registered and logged in"),
                Err(e) => fail(e),
            }
        }

        Request::PlayerLogin { name, password } => {
            match state.sessions.login(&name, &password).await {
                Ok(()) => Response::message("login success"),
                Err(e) => fail(e),
            }
        }

        Request::PlayerLogout { name } => {
            state.sessions.logout(&name).await;
            Response::ok()
        }

        Request::PlayerHeartbeat { name } => match state.sessions.heartbeat(&name).await {
            Ok(()) => Response::ok(),
            Err(e) => fail(e),
        },

        Request::ListPlayers => Response::Ok {
            body: Body::Players {
                players: state.sessions.list_online().await,
            },
        },

        // -- Catalog & ratings --------------------------------------------
        Request::GetGames => Response::Ok {
            body: Body::Games {
                games: state.catalog.list_games().await,
            },
        },

        Request::GetGameDetail { game_key } => {
            match state.catalog.game_detail(&game_key).await {
                Ok(detail) => Response::Ok {
                    body: Body::Detail(detail),
                },
                Err(e) => fail(e),
            }
        }

        Request::SubmitRating {
            player,
            game_key,
            score,
            comment,
        } => {
            if let Err(e) = state.sessions.require_online(&player).await {
                return fail(e);
            }
            match state
                .catalog
                .submit_rating(&player, &game_key, score, comment)
                .await
            {
                Ok(()) => Response::message("rating submitted"),
                Err(e) => fail(e),
            }
        }

        // -- Rooms --------------------------------------------------------
        Request::CreateRoom {
            player,
            game_key,
            version,
        } => {
            if let Err(e) = state.sessions.require_online(&player).await {
                return fail(e);
            }
            let artifact = match state.catalog.resolve_artifact(&game_key, &version).await {
                Ok(artifact) => artifact,
                Err(e) => return fail(e),
            };
            match state.rooms.create(&player, &artifact).await {
                Ok(room) => Response::room(Some("room created".into()), room),
                Err(e) => fail(e),
            }
        }

        Request::ListRooms => Response::Ok {
            body: Body::Rooms {
                rooms: state.rooms.list().await,
            },
        },

        Request::JoinRoom { player, room_id } => {
            if let Err(e) = state.sessions.require_online(&player).await {
                return fail(e);
            }
            match state.rooms.join(&player, room_id).await {
                Ok(room) => Response::room(None, room),
                Err(e) => fail(e),
            }
        }

        Request::LeaveRoom { player } => match state.rooms.leave(&player).await {
            Ok(()) => Response::message("left room"),
            Err(e) => fail(e),
        },

        Request::DeleteRoom { player, room_id } => {
            match state.rooms.delete(&player, room_id).await {
                Ok(()) => Response::message("room deleted"),
                Err(e) => fail(e),
            }
        }

        Request::StartRoom { player, room_id } => {
            if let Err(e) = state.sessions.require_online(&player).await {
                return fail(e);
            }
            // The artifact must still resolve at start time; the game and
            // version are pinned by the room itself.
            let room = match state.rooms.get(room_id).await {
                Some(room) => room,
                None => return fail(RoomError::NotFound(room_id)),
            };
            let artifact = match state
                .catalog
                .resolve_artifact(&room.game_key, &room.version)
                .await
            {
                Ok(artifact) => artifact,
                Err(e) => return fail(e),
            };
            match state
                .rooms
                .start(&player, room_id, &artifact, &state.supervisor)
                .await
            {
                Ok(room) => Response::room(Some("game started".into()), room),
                Err(e) => fail(e),
            }
        }

        // -- Chat ---------------------------------------------------------
        Request::RoomChatSend {
            room_id,
            player,
            message,
        } => {
            if let Err(e) = state.sessions.require_online(&player).await {
                return fail(e);
            }
            match state.chat.send(room_id, &player, message).await {
                Ok(()) => Response::message("chat sent"),
                Err(e) => fail(e),
            }
        }

        Request::RoomChatFetch { room_id, player } => {
            if let Err(e) = state.sessions.require_online(&player).await {
                return fail(e);
            }
            match state.chat.fetch(room_id, &player).await {
                Ok(messages) => Response::Ok {
                    body: Body::Chat { messages },
                },
                Err(e) => fail(e),
            }
        }
    }
}

fn fail(err: impl Into<LobbyError>) -> Response {
    err.into().to_response()
}
