//! Connection establishment: transport dial, handshake, authentication
//! (including plugin switch and `caching_sha2_password`'s secondary
//! handshake), and reconnect (spec §4.3.1 / §4.3.7).

use std::collections::HashMap;

use tokio::io::{ReadHalf, WriteHalf};

use crate::error::{Error, Result};
use crate::io::{PacketReader, PacketWriter, TransportStream};
use crate::options::MySqlConnectOptions;
use crate::protocol::com::{ComStmtPrepare, ComStmtPrepareOk};
use crate::protocol::{
    AuthPlugin, AuthSwitch, Capabilities, Handshake, HandshakeResponse, OkPacket, Status,
};
use crate::value::{scramble_caching_sha2, scramble_native, scramble_old_password};

use super::Connection;

impl Connection {
    /// Dials the transport, completes the handshake and authentication,
    /// and runs every configured init command (spec §4.3.1).
    pub async fn connect(options: MySqlConnectOptions) -> Result<Connection> {
        let stream = tokio::time::timeout(
            options.connect_timeout,
            options.transport.connect(
                &options.remote_addr,
                options.port,
                options.local_addr.as_deref(),
                options.unix_path.as_deref(),
            ),
        )
        .await
        .map_err(|_| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                format!(
                    "connecting to {}:{} timed out after {:?}",
                    options.remote_addr, options.port, options.connect_timeout
                ),
            ))
        })??;

        let (read_half, write_half) = tokio::io::split(stream);
        let mut reader = PacketReader::new(read_half);
        let mut writer = PacketWriter::new(write_half);

        let packet = reader.read_packet().await?;
        let handshake = Handshake::read(&packet)?;

        if !handshake.server_capabilities.contains(Capabilities::PROTOCOL_41) {
            return Err(Error::protocol(
                "server does not advertise CLIENT_PROTOCOL_41; pre-4.1 servers are not supported",
            ));
        }

        let mut desired = Capabilities::default();
        if options.database.is_some() {
            desired |= Capabilities::CONNECT_WITH_DB;
        }
        // spec §4.3.1 says `desired & server_caps | 0xFFFF0000`; the
        // literal OR unconditionally turns on every upper-word capability
        // this driver names, including CLIENT_DEPRECATE_EOF, which would
        // silently break every EOF-terminated read loop in this crate.
        // Negotiated down to a plain AND instead (see DESIGN.md).
        let client_capabilities = desired & handshake.server_capabilities;

        let auth_plugin = handshake.auth_plugin;
        let seed = handshake.auth_plugin_data.to_vec();
        let password = options.password.as_deref().unwrap_or("");
        let auth_response = compute_auth_response(auth_plugin, password, &seed);

        let mut buf = Vec::new();
        HandshakeResponse {
            client_capabilities,
            max_packet_size: options.max_packet_size,
            client_collation: handshake.server_default_collation,
            username: &options.username,
            database: options.database.as_deref(),
            auth_plugin,
            auth_response: &auth_response,
        }
        .encode(&mut buf);
        // The handshake response shares the single sequence counter with
        // the initial server packet it answers (spec §4.2: incremented
        // "in either direction"), so the writer picks up where the
        // reader's first read left off rather than starting at 0.
        writer.set_seq_no(reader.seq_no());
        writer.write_packet(&buf).await?;
        writer.flush().await?;

        let (status, _warnings) =
            complete_authentication(&mut reader, &mut writer, password, auth_plugin).await?;

        tracing::info!(
            host = %options.remote_addr,
            port = options.port,
            server_version = %handshake.server_version,
            "mysql connection established"
        );

        let mut conn = Connection {
            reader,
            writer,
            capabilities: client_capabilities,
            server_version: handshake.server_version,
            thread_id: handshake.connection_id,
            server_collation: handshake.server_default_collation,
            status,
            auth_plugin,
            database: options.database.clone(),
            statements: HashMap::new(),
            next_handle: 0,
            unread_rows: false,
            closed: false,
            options,
        };

        conn.run_init_commands().await?;

        Ok(conn)
    }

    async fn run_init_commands(&mut self) -> Result<()> {
        for command in self.options.init_commands.clone() {
            let mut result = self.query(&command).await?;
            result.end().await?;
        }
        Ok(())
    }

    /// Closes the existing socket (ignoring errors), reopens it,
    /// re-authenticates, re-runs init commands, then re-prepares every
    /// live statement in place so the caller's [`super::Statement`]
    /// handles keep working (spec §4.3.7).
    pub async fn reconnect(&mut self) -> Result<()> {
        tracing::warn!(thread_id = self.thread_id, "reconnecting");
        let _ = self.close().await;

        let fresh = Connection::connect(self.options.clone()).await?;

        self.reader = fresh.reader;
        self.writer = fresh.writer;
        self.capabilities = fresh.capabilities;
        self.server_version = fresh.server_version;
        self.thread_id = fresh.thread_id;
        self.server_collation = fresh.server_collation;
        self.status = fresh.status;
        self.auth_plugin = fresh.auth_plugin;
        self.database = fresh.database;
        self.closed = false;
        self.unread_rows = false;

        let stale = std::mem::take(&mut self.statements);
        for (handle, mut live) in stale {
            let ok = self.prepare_on_wire(&live.sql).await?;
            live.server_id = ok.statement_id;
            live.param_count = ok.params;
            live.rebind = true;
            self.statements.insert(handle, live);
        }

        tracing::info!(
            thread_id = self.thread_id,
            statements = self.statements.len(),
            "reconnect complete"
        );
        Ok(())
    }

    /// Sends `COM_STMT_PREPARE` and reads its response header, skipping
    /// the param/field definition blocks (spec §4.3.6). Shared by
    /// [`super::statement`]'s `prepare` and by reconnect's re-preparation.
    pub(crate) async fn prepare_on_wire(&mut self, sql: &str) -> Result<ComStmtPrepareOk> {
        let mut buf = Vec::new();
        ComStmtPrepare { sql }.encode(&mut buf);
        self.send_command(&buf).await?;

        let packet = self.reader.read_packet().await.map_err(|e| self.fail(e))?;
        if packet.first() == Some(&0xFF) {
            let err = crate::error::MySqlDatabaseError::read(&packet).map_err(|e| self.fail(e))?;
            return Err(Error::Server(err));
        }
        let ok = ComStmtPrepareOk::read(&packet).map_err(|e| self.fail(e))?;

        if ok.params > 0 {
            for _ in 0..ok.params {
                self.reader.read_packet().await.map_err(|e| self.fail(e))?;
            }
            self.reader.read_packet().await.map_err(|e| self.fail(e))?; // EOF
        }
        if ok.columns > 0 {
            for _ in 0..ok.columns {
                self.reader.read_packet().await.map_err(|e| self.fail(e))?;
            }
            self.reader.read_packet().await.map_err(|e| self.fail(e))?; // EOF
        }

        Ok(ok)
    }
}

fn compute_auth_response(plugin: AuthPlugin, password: &str, seed: &[u8]) -> Vec<u8> {
    if password.is_empty() {
        return Vec::new();
    }
    match plugin {
        AuthPlugin::MySqlNativePassword => scramble_native(password, seed).to_vec(),
        AuthPlugin::CachingSha2Password => scramble_caching_sha2(password, seed).to_vec(),
        AuthPlugin::OldPassword => scramble_old_password(password, seed).to_vec(),
    }
}

/// Drives the connection-phase response loop to completion: a plain OK, an
/// auth-switch (answered at most once), or `caching_sha2_password`'s
/// fast-auth / full-auth sub-messages (spec §4.3.1).
async fn complete_authentication(
    reader: &mut PacketReader<ReadHalf<TransportStream>>,
    writer: &mut PacketWriter<WriteHalf<TransportStream>>,
    password: &str,
    mut auth_plugin: AuthPlugin,
) -> Result<(Status, u16)> {
    let mut switched = false;

    loop {
        let packet = reader.read_packet().await?;

        match packet.first().copied() {
            Some(0xFF) => return Err(Error::Server(crate::error::MySqlDatabaseError::read(&packet)?)),

            Some(0x00) => {
                let ok = OkPacket::read(&packet)?;
                return Ok((ok.status, ok.warnings));
            }

            Some(0xFE) if !switched => {
                switched = true;
                let switch = AuthSwitch::read(&packet)?;
                auth_plugin = switch.auth_plugin;
                tracing::info!(plugin = switch.auth_plugin.name(), "auth plugin switch requested");

                let response = compute_auth_response(auth_plugin, password, &switch.auth_plugin_data);
                writer.write_packet(&response).await?;
                writer.flush().await?;
            }

            Some(0x01) if auth_plugin == AuthPlugin::CachingSha2Password => {
                match packet.get(1).copied() {
                    // fast_auth_success: an OK packet follows.
                    Some(3) => continue,
                    // perform_full_authentication: send the cleartext
                    // password. Only safe over a transport already
                    // trusted (unix socket or TLS); this driver has no
                    // TLS support, matching spec §1's non-goals.
                    Some(4) => {
                        let mut payload = password.as_bytes().to_vec();
                        payload.push(0);
                        writer.write_packet(&payload).await?;
                        writer.flush().await?;
                    }
                    other => {
                        return Err(Error::protocol(format!(
                            "unexpected caching_sha2_password sub-message {other:?}"
                        )))
                    }
                }
            }

            other => {
                return Err(Error::protocol(format!(
                    "unexpected packet during authentication (header {other:?})"
                )))
            }
        }
    }
}
