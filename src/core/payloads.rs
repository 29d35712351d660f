//! Payload catalog
//!
//! Raw text of every file the bootstrap writes on the node, apart from
//! `client.rb` (see [`crate::core::client_config`]). Each payload is a pure
//! function of its inputs and is run through the encoder by the context
//! before it is embedded in a script.

use serde_json::{Map, Value};

use crate::config::paths::{CLIENT_BIN_DIRS, CLIENT_RB, FIRST_BOOT_JSON};

/// Named payloads that can be requested individually
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// `client.rb`
    ClientConfig,
    /// Validation key
    ValidationKey,
    /// Encrypted data bag secret
    Secret,
    /// VBScript download helper
    WgetVbs,
    /// PowerShell download helper
    WgetPs,
    /// First-boot attributes document
    FirstBoot,
    /// Installer invocation with fallback
    Install,
    /// Client start commands
    StartClient,
    /// Inline trusted certificate writes
    TrustedCerts,
}

/// Key under which the run list is merged into the first-boot document
pub const RUN_LIST_KEY: &str = "run_list";

/// Download helper run by `cscript`
///
/// Named arguments `/url:`, `/path:` and the optional `/proxy:`. A user-level
/// `HTTP_PROXY` variable takes precedence over the named proxy. The target
/// file is replaced only after a successful (200) response.
pub const WGET_VBS: &str = r#"url = WScript.Arguments.Named("url")
path = WScript.Arguments.Named("path")
proxy = null
Set objXMLHTTP = CreateObject("MSXML2.ServerXMLHTTP")
Set wshShell = CreateObject( "WScript.Shell" )
Set objUserVariables = wshShell.Environment("USER")

rem http proxy is optional
rem attempt to read from HTTP_PROXY env var first
On Error Resume Next

If NOT (objUserVariables("HTTP_PROXY") = "") Then
proxy = objUserVariables("HTTP_PROXY")

rem fall back to named arg
ElseIf NOT (WScript.Arguments.Named("proxy") = "") Then
proxy = WScript.Arguments.Named("proxy")
End If

If NOT isNull(proxy) Then
rem setProxy method is only available on ServerXMLHTTP 6.0+
Set objXMLHTTP = CreateObject("MSXML2.ServerXMLHTTP.6.0")
objXMLHTTP.setProxy 2, proxy
End If

On Error Goto 0

objXMLHTTP.open "GET", url, false
objXMLHTTP.send()
If objXMLHTTP.Status = 200 Then
Set objADOStream = CreateObject("ADODB.Stream")
objADOStream.Open
objADOStream.Type = 1
objADOStream.Write objXMLHTTP.ResponseBody
objADOStream.Position = 0
Set objFSO = Createobject("Scripting.FileSystemObject")
If objFSO.Fileexists(path) Then objFSO.DeleteFile path
Set objFSO = Nothing
objADOStream.SaveToFile path
objADOStream.Close
Set objADOStream = Nothing
End if
Set objXMLHTTP = Nothing
"#;

/// Download helper run by `powershell`
///
/// Same contract as [`WGET_VBS`]: `-remoteUrl`, `-localPath` and an optional
/// `-proxy`, with `HTTP_PROXY` taking precedence. The file is downloaded next
/// to its destination and moved into place once complete.
pub const WGET_PS: &str = r#"param(
   [String] $remoteUrl,
   [String] $localPath,
   [String] $proxy = ""
)

$ErrorActionPreference = "Stop"

if ($env:HTTP_PROXY) {
    $proxy = $env:HTTP_PROXY
}

$webClient = new-object System.Net.WebClient;
if ($proxy -ne "") {
    $webClient.Proxy = new-object System.Net.WebProxy($proxy, $true);
}

$partialPath = "$localPath.partial"
$webClient.DownloadFile($remoteUrl, $partialPath);
Move-Item -Force -Path $partialPath -Destination $localPath
"#;

/// First-boot document: caller attributes plus the run list
///
/// The run list always wins over an attribute of the same name. Keys are
/// serialized in sorted order so the output is deterministic.
pub fn first_boot_json(attributes: &Map<String, Value>, run_list: &[String]) -> String {
    let mut document = attributes.clone();
    document.insert(
        RUN_LIST_KEY.to_string(),
        Value::Array(run_list.iter().cloned().map(Value::String).collect()),
    );
    Value::Object(document).to_string()
}

/// Commands that start the first client run
pub fn start_client(environment: &str) -> String {
    format!(
        "SET \"PATH=%PATH%;{bin_dirs}\"\nchef-client -c {CLIENT_RB} -j {FIRST_BOOT_JSON} -E {environment}\n",
        bin_dirs = CLIENT_BIN_DIRS.join(";"),
    )
}
